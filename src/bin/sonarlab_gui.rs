use std::collections::VecDeque;
use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints, Polygon};

use sonarlab::config::{Control, Demo, Scenario};
use sonarlab::constants::{ACTIVE_SPACE_PLOT_EXTENT_KM, DB_PLOT_RANGE};
use sonarlab::output::{Formatter, TextFormatter};
use sonarlab::session::{Evaluation, Session};
use sonarlab::signal::AttenuationTrace;
use sonarlab::sonar::{ActiveSpace, SourceLevel};

#[derive(Parser, Debug)]
#[command(name = "sonarlab_gui")]
#[command(about = "Underwater acoustics demos - GUI", long_about = None)]
struct Args {
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML scenario file with initial slider values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

enum GuiUpdate {
    Evaluated(Evaluation),
    Log(String),
}

struct GuiLogger {
    tx: Sender<GuiUpdate>,
    max_level: log::LevelFilter,
}

impl log::Log for GuiLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let msg = format!("[{}] {}", record.level(), record.args());
            let _ = self.tx.send(GuiUpdate::Log(msg));
        }
    }

    fn flush(&self) {}
}

const MAX_LOG_LINES: usize = 1000;
const OUTLINE_SEGMENTS: usize = 256;
const PLOT_HEIGHT: f32 = 260.0;

const RESULT_FILL: egui::Color32 = egui::Color32::from_rgb(212, 237, 218);
const RESULT_TEXT: egui::Color32 = egui::Color32::from_rgb(21, 87, 36);
const SOURCE_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 200, 255);
const RECEIVED_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 150, 50);

fn equation(demo: Demo) -> &'static str {
    match demo {
        Demo::ActiveSpace => "PL = SL - NL - DT + PG,   r_max = 10^(PL / a)",
        Demo::SourceLevel => "SL = DT + TL + NL - PG",
        Demo::Attenuation => "TL = 10 log10(r),   p_received = p_source * 10^(-TL / 10)",
    }
}

/// Fixed ±500 km square, whatever the detection range
fn active_space_bounds() -> PlotBounds {
    let extent = ACTIVE_SPACE_PLOT_EXTENT_KM;
    PlotBounds::from_min_max([-extent, -extent], [extent, extent])
}

/// Full time window on x, 40-200 dB on y
fn level_bounds(trace: &AttenuationTrace) -> PlotBounds {
    let (db_min, db_max) = DB_PLOT_RANGE;
    let t0 = trace.time.first().copied().unwrap_or(0.0);
    let t1 = trace.time.last().copied().unwrap_or(t0);
    PlotBounds::from_min_max([t0, db_min], [t1, db_max])
}

fn result_panel(ui: &mut egui::Ui, text: &str) {
    egui::Frame::new()
        .fill(RESULT_FILL)
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(5))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(RESULT_TEXT).size(20.0));
        });
}

struct SonarGuiApp {
    rx: Receiver<GuiUpdate>,
    session: Session,
    formatter: TextFormatter,
    tab: Demo,
    active_space: Option<ActiveSpace>,
    source_level: Option<SourceLevel>,
    attenuation: Option<AttenuationTrace>,
    log_lines: VecDeque<String>,
}

impl SonarGuiApp {
    fn new(
        _cc: &eframe::CreationContext<'_>,
        rx: Receiver<GuiUpdate>,
        tx: Sender<GuiUpdate>,
        scenario: Scenario,
    ) -> Self {
        let mut session = Session::new(scenario);
        session.subscribe(move |evaluation| {
            let _ = tx.send(GuiUpdate::Evaluated(evaluation.clone()));
        });
        for demo in Demo::ALL {
            session.refresh(demo);
        }

        Self {
            rx,
            session,
            formatter: TextFormatter::new(false),
            tab: Demo::ActiveSpace,
            active_space: None,
            source_level: None,
            attenuation: None,
            log_lines: VecDeque::new(),
        }
    }

    fn drain_updates(&mut self) {
        while let Ok(update) = self.rx.try_recv() {
            match update {
                GuiUpdate::Evaluated(Evaluation::ActiveSpace(r)) => self.active_space = Some(r),
                GuiUpdate::Evaluated(Evaluation::SourceLevel(r)) => self.source_level = Some(r),
                GuiUpdate::Evaluated(Evaluation::Attenuation(t)) => self.attenuation = Some(t),
                GuiUpdate::Log(line) => {
                    self.log_lines.push_back(line);
                    while self.log_lines.len() > MAX_LOG_LINES {
                        self.log_lines.pop_front();
                    }
                }
            }
        }
    }

    fn draw_sliders(&mut self, ui: &mut egui::Ui, demo: Demo) {
        ui.horizontal_wrapped(|ui| {
            for control in demo.controls() {
                self.draw_slider(ui, control);
                ui.add_space(12.0);
            }
        });
    }

    fn draw_slider(&mut self, ui: &mut egui::Ui, control: Control) {
        let spec = control.slider();
        let mut value = self.session.value(control);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(spec.label).color(egui::Color32::LIGHT_GRAY));
            let mut slider = egui::Slider::new(&mut value, spec.min..=spec.max).step_by(spec.step);
            if !spec.unit.is_empty() {
                slider = slider.suffix(format!(" {}", spec.unit));
            }
            if ui.add(slider).changed() {
                self.session.set(control, value);
            }
        });
    }

    fn draw_active_space(&mut self, ui: &mut egui::Ui) {
        self.draw_sliders(ui, Demo::ActiveSpace);
        ui.add_space(8.0);

        let Some(space) = self.active_space else {
            return;
        };
        result_panel(ui, &self.formatter.active_space(&space));
        ui.add_space(8.0);

        let outline: PlotPoints = space.outline_km(OUTLINE_SEGMENTS).into();
        Plot::new("active_space_plot")
            .view_aspect(1.0)
            .data_aspect(1.0)
            .x_axis_label("x (km)")
            .y_axis_label("y (km)")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(active_space_bounds());
                plot_ui.polygon(
                    Polygon::new("Active space", outline)
                        .fill_color(egui::Color32::from_rgba_unmultiplied(255, 0, 0, 128))
                        .stroke(egui::Stroke::new(1.0, egui::Color32::RED)),
                );
            });
    }

    fn draw_source_level(&mut self, ui: &mut egui::Ui) {
        self.draw_sliders(ui, Demo::SourceLevel);
        ui.add_space(8.0);

        if let Some(result) = self.source_level {
            result_panel(ui, &self.formatter.source_level(&result));
        }
    }

    fn draw_attenuation(&mut self, ui: &mut egui::Ui) {
        self.draw_sliders(ui, Demo::Attenuation);
        ui.add_space(8.0);

        let Some(trace) = &self.attenuation else {
            return;
        };
        ui.label(
            egui::RichText::new(format!(
                "TL = {:.2} dB, received = source x {:.3e}",
                trace.transmission_loss_db, trace.attenuation_factor
            ))
            .color(egui::Color32::WHITE),
        );

        let series = |values: &[f64]| -> PlotPoints {
            trace
                .time
                .iter()
                .zip(values)
                .filter(|(_, y)| y.is_finite())
                .map(|(&t, &y)| [t, y])
                .collect()
        };

        ui.label(
            egui::RichText::new("Source and received signals in Pascals")
                .color(egui::Color32::LIGHT_GRAY)
                .small(),
        );
        Plot::new("pressure_plot")
            .height(PLOT_HEIGHT)
            .x_axis_label("Time (s)")
            .y_axis_label("Amplitude (Pa)")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new("Source signal", series(&trace.source)).color(SOURCE_COLOR));
                plot_ui.line(
                    Line::new("Received signal", series(&trace.received)).color(RECEIVED_COLOR),
                );
            });

        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Source and received signals in dB")
                .color(egui::Color32::LIGHT_GRAY)
                .small(),
        );
        let bounds = level_bounds(trace);
        Plot::new("level_plot")
            .height(PLOT_HEIGHT)
            .x_axis_label("Time (s)")
            .y_axis_label("Amplitude (dB re. 1µPa)")
            .legend(Legend::default())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(bounds);
                plot_ui.line(
                    Line::new("Source signal", series(&trace.source_db)).color(SOURCE_COLOR),
                );
                plot_ui.line(
                    Line::new("Received signal", series(&trace.received_db))
                        .color(RECEIVED_COLOR),
                );
            });
    }
}

impl eframe::App for SonarGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_updates();

        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for demo in Demo::ALL {
                    ui.selectable_value(&mut self.tab, demo, demo.title());
                }
                ui.separator();
                if ui.button("Reset").clicked() {
                    self.session.reset();
                }
            });
        });

        egui::TopBottomPanel::bottom("debug_log")
            .resizable(true)
            .default_height(100.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Log")
                            .color(egui::Color32::LIGHT_GRAY)
                            .strong(),
                    );
                    if ui.small_button("Clear").clicked() {
                        self.log_lines.clear();
                    }
                });
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.log_lines {
                            ui.label(
                                egui::RichText::new(line)
                                    .font(egui::FontId::monospace(11.0))
                                    .color(egui::Color32::from_rgb(180, 180, 180)),
                            );
                        }
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.tab.title());
            ui.label(egui::RichText::new(equation(self.tab)).monospace());
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
                Demo::ActiveSpace => self.draw_active_space(ui),
                Demo::SourceLevel => self.draw_source_level(ui),
                Demo::Attenuation => self.draw_attenuation(ui),
            });
        });
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let (tx, rx) = crossbeam_channel::unbounded::<GuiUpdate>();

    let logger = GuiLogger {
        tx: tx.clone(),
        max_level: log_level,
    };
    log::set_boxed_logger(Box::new(logger)).ok();
    log::set_max_level(log_level);

    let scenario = match &args.config {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([700.0, 500.0])
            .with_title("Propagation examples"),
        ..Default::default()
    };

    eframe::run_native(
        "sonarlab",
        native_options,
        Box::new(move |cc| Ok(Box::new(SonarGuiApp::new(cc, rx, tx, scenario)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
