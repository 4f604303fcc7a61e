use common::game::{GameState, GameStatus, Mark, SessionRng, WINNING_LINES};
use eframe::egui;

/// Presentation layer: paints the grid, forwards clicks to the game and
/// displays the outcome. All game rules live in `common`.
pub struct GameApp {
    game: GameState,
    rng: SessionRng,
    player_name: String,
    last_hover: Option<usize>,
}

impl GameApp {
    const BOARD_PADDING: f32 = 40.0;
    const INFO_PANEL_WIDTH: f32 = 200.0;
    const MIN_CELL_SIZE: f32 = 40.0;
    const MAX_CELL_SIZE: f32 = 140.0;
    const LINE_WIDTH: f32 = 2.0;

    pub fn new(player_name: String) -> Self {
        let mut game = GameState::new(Mark::O);
        let mut rng = SessionRng::from_random();
        if let Some(index) = game.cpu_open(&mut rng) {
            common::log!("CPU opened at cell {}", index);
        }

        Self {
            game,
            rng,
            player_name,
            last_hover: None,
        }
    }

    fn start_new_game(&mut self) {
        self.game.reset();
        self.last_hover = None;
        if let Some(index) = self.game.cpu_open(&mut self.rng) {
            common::log!("CPU opened at cell {}", index);
        }
    }

    fn calculate_cell_size(available_width: f32, available_height: f32) -> f32 {
        let board_width = available_width - Self::INFO_PANEL_WIDTH - Self::BOARD_PADDING * 2.0;
        let board_height = available_height - Self::BOARD_PADDING * 2.0;

        let cell_size = (board_width / 3.0).min(board_height / 3.0);
        cell_size.clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE)
    }

    fn cell_rect(board_rect: egui::Rect, index: usize, cell_size: f32) -> egui::Rect {
        let col = (index % 3) as f32;
        let row = (index / 3) as f32;
        egui::Rect::from_min_size(
            egui::pos2(
                board_rect.left() + col * cell_size,
                board_rect.top() + row * cell_size,
            ),
            egui::vec2(cell_size, cell_size),
        )
    }

    fn status_message(status: GameStatus) -> Option<&'static str> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::XWon => Some("X is the winner!"),
            GameStatus::OWon => Some("O is the winner!"),
            GameStatus::Draw => Some("Draw!"),
        }
    }

    /// One full mark-and-respond cycle for a clicked cell.
    fn handle_click(&mut self, index: usize) {
        if !self.game.play_human(index) {
            return;
        }

        if let Err(e) = self.game.cpu_respond() {
            common::log!("CPU move failed: {}", e);
        }

        if let Some(message) = Self::status_message(self.game.status()) {
            common::log!("Game over: {}", message);
        }
    }

    fn winning_line(&self) -> Option<[usize; 3]> {
        let winner = self.game.status().winner()?;
        WINNING_LINES
            .iter()
            .find(|line| {
                line.iter()
                    .all(|&index| self.game.board().get(index) == Some(winner))
            })
            .copied()
    }

    fn render_board(&mut self, ui: &mut egui::Ui, cell_size: f32) {
        let board_size = cell_size * 3.0;
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(board_size, board_size), egui::Sense::click());

        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));

        for i in 0..=3 {
            let x = rect.left() + i as f32 * cell_size;
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK),
            );

            let y = rect.top() + i as f32 * cell_size;
            painter.line_segment(
                [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
                egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK),
            );
        }

        for index in 0..9 {
            let cell_rect = Self::cell_rect(rect, index, cell_size);
            match self.game.board().get(index) {
                Some(Mark::X) => Self::draw_x(painter, cell_rect),
                Some(Mark::O) => Self::draw_o(painter, cell_rect),
                _ => {}
            }
        }

        if !self.game.is_ended() {
            if let Some(hover_pos) = response.hover_pos() {
                let col = ((hover_pos.x - rect.left()) / cell_size) as usize;
                let row = ((hover_pos.y - rect.top()) / cell_size) as usize;

                if col < 3 && row < 3 && self.game.board().is_empty(row * 3 + col) {
                    let index = row * 3 + col;
                    painter.rect_filled(
                        Self::cell_rect(rect, index, cell_size),
                        0.0,
                        egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
                    );
                    self.last_hover = Some(index);
                } else {
                    self.last_hover = None;
                }
            } else {
                self.last_hover = None;
            }

            if response.clicked()
                && let Some(index) = self.last_hover
            {
                self.handle_click(index);
            }
        } else if let Some(line) = self.winning_line() {
            let start = Self::cell_rect(rect, line[0], cell_size).center();
            let end = Self::cell_rect(rect, line[2], cell_size).center();
            painter.line_segment(
                [start, end],
                egui::Stroke::new(6.0, egui::Color32::from_rgba_unmultiplied(50, 200, 50, 200)),
            );
        }
    }

    fn draw_x(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(220, 50, 50));

        painter.line_segment(
            [
                egui::pos2(rect.left() + padding, rect.top() + padding),
                egui::pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );

        painter.line_segment(
            [
                egui::pos2(rect.right() - padding, rect.top() + padding),
                egui::pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let radius = rect.width() / 2.0 - padding;
        let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(50, 50, 220));

        painter.circle_stroke(rect.center(), radius, stroke);
    }

    fn render_info_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tic-Tac-Toe");
        ui.separator();

        ui.label(format!("{}: CPU (Bot)", self.game.cpu_mark().as_char()));
        ui.label(format!(
            "{}: {}",
            self.game.human_mark().as_char(),
            self.player_name
        ));
        ui.separator();

        match self.game.status() {
            GameStatus::InProgress => {
                ui.colored_label(
                    egui::Color32::GREEN,
                    format!("Your turn ({})", self.game.human_mark().as_char()),
                );
            }
            GameStatus::Draw => {
                ui.label("Draw!");
            }
            status => {
                if let Some(message) = Self::status_message(status) {
                    ui.colored_label(egui::Color32::GREEN, message);
                }
                if status.winner() == Some(self.game.human_mark()) {
                    ui.label("Congratulations! You won!");
                }
            }
        }

        ui.separator();

        if ui.button("Reset").clicked() {
            self.start_new_game();
        }
    }
}

impl eframe::App for GameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available_width = ui.available_width();
            let available_height = ui.available_height();
            let cell_size = Self::calculate_cell_size(available_width, available_height);
            let board_width = cell_size * 3.0;

            ui.horizontal(|ui| {
                ui.allocate_ui(
                    egui::vec2(board_width + Self::BOARD_PADDING * 2.0, available_height),
                    |ui| {
                        self.render_board(ui, cell_size);
                    },
                );

                ui.separator();

                ui.vertical(|ui| {
                    self.render_info_panel(ui);
                });
            });
        });
    }
}
