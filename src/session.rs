//! Interactive session state.
//!
//! A [`Session`] holds the current value of every control. Changing a control
//! re-evaluates the demo that owns it and hands the fresh result to every
//! subscribed observer, so front ends only render what they are given.

use crate::config::{Control, Demo, Scenario};
use crate::signal::AttenuationTrace;
use crate::sonar::{ActiveSpace, SourceLevel};

/// Result of evaluating one demo
#[derive(Debug, Clone)]
pub enum Evaluation {
    ActiveSpace(ActiveSpace),
    SourceLevel(SourceLevel),
    Attenuation(AttenuationTrace),
}

impl Evaluation {
    pub fn demo(&self) -> Demo {
        match self {
            Evaluation::ActiveSpace(_) => Demo::ActiveSpace,
            Evaluation::SourceLevel(_) => Demo::SourceLevel,
            Evaluation::Attenuation(_) => Demo::Attenuation,
        }
    }
}

/// Evaluate a demo against the inputs in `scenario`.
pub fn evaluate(scenario: &Scenario, demo: Demo) -> Evaluation {
    match demo {
        Demo::ActiveSpace => Evaluation::ActiveSpace(ActiveSpace::evaluate(&scenario.active_space)),
        Demo::SourceLevel => Evaluation::SourceLevel(SourceLevel::evaluate(&scenario.source_level)),
        Demo::Attenuation => {
            Evaluation::Attenuation(AttenuationTrace::simulate(&scenario.attenuation))
        }
    }
}

type Observer = Box<dyn FnMut(&Evaluation) + Send>;

pub struct Session {
    scenario: Scenario,
    observers: Vec<Observer>,
}

impl Session {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            observers: Vec::new(),
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn value(&self, control: Control) -> f64 {
        self.scenario.get(control)
    }

    /// Register a callback run after every re-evaluation.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Evaluation) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Move `control` to `value`, snapped onto its slider grid.
    ///
    /// Observers are notified once if the stored value changed. Returns the
    /// value actually stored.
    pub fn set(&mut self, control: Control, value: f64) -> f64 {
        let snapped = control.slider().snap(value);
        if snapped == self.scenario.get(control) {
            log::trace!("{} unchanged at {}", control.slider().label, snapped);
            return snapped;
        }

        log::debug!("{} = {}", control.slider().label, snapped);
        self.scenario.set(control, snapped);
        self.refresh(control.demo());
        snapped
    }

    /// Evaluate `demo` and notify observers unconditionally.
    pub fn refresh(&mut self, demo: Demo) -> Evaluation {
        let evaluation = evaluate(&self.scenario, demo);
        for observer in &mut self.observers {
            observer(&evaluation);
        }
        evaluation
    }

    /// Return every control to its slider default and re-evaluate all demos.
    pub fn reset(&mut self) {
        self.scenario = Scenario::default();
        for demo in Demo::ALL {
            self.refresh(demo);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Scenario::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ActiveSpaceInput, AttenuationInput, SourceLevelInput};
    use std::sync::{Arc, Mutex};

    fn recording_session() -> (Session, Arc<Mutex<Vec<Evaluation>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut session = Session::default();
        let sink = Arc::clone(&seen);
        session.subscribe(move |e| sink.lock().unwrap().push(e.clone()));
        (session, seen)
    }

    #[test]
    fn test_set_notifies_once_with_owning_demo() {
        let (mut session, seen) = recording_session();

        let stored = session.set(
            Control::SourceLevel(SourceLevelInput::TransmissionLoss),
            65.0,
        );
        assert_eq!(stored, 65.0);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        match &seen[0] {
            Evaluation::SourceLevel(sl) => assert_eq!(sl.source_level_db, 132.0),
            other => panic!("unexpected evaluation {:?}", other.demo()),
        }
    }

    #[test]
    fn test_unchanged_value_does_not_notify() {
        let (mut session, seen) = recording_session();
        session.set(Control::ActiveSpace(ActiveSpaceInput::SourceLevel), 165.0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_is_snapped() {
        let (mut session, seen) = recording_session();
        let control = Control::ActiveSpace(ActiveSpaceInput::NoiseLevel);

        assert_eq!(session.set(control, 250.0), 99.0);
        assert_eq!(session.value(control), 99.0);
        assert_eq!(session.set(control, 10.0), 75.0);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_attenuation_change_resamples() {
        let (mut session, seen) = recording_session();
        session.set(Control::Attenuation(AttenuationInput::Distance), 101.0);

        let seen = seen.lock().unwrap();
        match &seen[0] {
            Evaluation::Attenuation(trace) => {
                assert_eq!(trace.distance_m, 101.0);
                assert_eq!(trace.len(), crate::constants::SAMPLE_COUNT);
            }
            other => panic!("unexpected evaluation {:?}", other.demo()),
        }
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (mut session, seen) = recording_session();
        session.set(Control::ActiveSpace(ActiveSpaceInput::ProcessingGain), 9.0);
        session.reset();

        assert_eq!(*session.scenario(), Scenario::default());
        let demos: Vec<Demo> = seen.lock().unwrap().iter().map(Evaluation::demo).collect();
        assert_eq!(
            demos,
            vec![
                Demo::ActiveSpace,
                Demo::ActiveSpace,
                Demo::SourceLevel,
                Demo::Attenuation
            ]
        );
    }

    #[test]
    fn test_evaluate_without_session() {
        match evaluate(&Scenario::default(), Demo::ActiveSpace) {
            Evaluation::ActiveSpace(space) => assert_eq!(space.propagation_loss_db, 50.0),
            other => panic!("unexpected evaluation {:?}", other.demo()),
        }
    }
}
