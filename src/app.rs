use eframe::egui::{self, Key, Modifiers};

use crate::data::views::View;
use crate::state::AppState;
use crate::ui::{panels, plot};

/// Ctrl/Cmd + digit picks the chart, in sidebar order.
const VIEW_KEYS: [Key; 6] = [Key::Num1, Key::Num2, Key::Num3, Key::Num4, Key::Num5, Key::Num6];

pub struct AuctionDashboardApp {
    pub state: AppState,
    /// Last title sent to the viewport.
    title: String,
}

impl AuctionDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            title: String::new(),
        }
    }

    /// Files dropped onto the window and keyboard shortcuts.
    fn handle_input(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
        if let Some(path) = dropped {
            log::info!("Opening dropped file {}", path.display());
            self.state.open(&path);
        }

        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::O)) {
            panels::open_file_dialog(&mut self.state);
        }
        for (key, view) in VIEW_KEYS.into_iter().zip(View::ALL) {
            if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, key)) {
                self.state.set_view(view);
            }
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = self.state.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}

impl eframe::App for AuctionDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.sync_title(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // Chart picker and per-view selections.
        egui::SidePanel::left("options_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_panel(ui, &self.state);
        });
    }
}
