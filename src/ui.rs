pub mod screen;
pub mod tower;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use crate::{
    app::{App, Overlay},
    celebration::Celebration,
    config::describe_countdown,
    game::AchievementActivation,
    skin::{Backdrop, InitialBlock},
    tiers::{AccuracyTier, Band, ClockPhase, ComboBanner, ACCURACY_BAR_BLOCKS},
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

const SPARK_COLORS: [Color; 7] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

const RAINBOW: [Color; 6] = [
    Color::Red,
    Color::LightRed,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
];

/// Draw the current screen, then the overlay and celebration on top.
pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(app.game.session().phase()).render(app, f);

    let area = f.area();
    match &app.overlay {
        Overlay::None => {}
        Overlay::Settings { draft } => render_settings(*draft, area, f.buffer_mut()),
        Overlay::Achievements(activation) => {
            render_achievements(activation, area, f.buffer_mut())
        }
        Overlay::QuitPrompt => render_quit_prompt(area, f.buffer_mut()),
    }

    if app.celebration.is_active() {
        render_celebration(&app.celebration, area, f.buffer_mut());
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// Accent colour for the session's backdrop.
pub fn backdrop_accent(backdrop: Backdrop) -> Color {
    match backdrop.index() {
        0 => Color::Cyan,
        _ => Color::Magenta,
    }
}

/// Block colour of a skin family.
pub fn family_color(block: InitialBlock) -> Color {
    match block.family() {
        1 => Color::Yellow,
        2 => Color::Cyan,
        3 => Color::Magenta,
        4 => Color::Green,
        5 => Color::Blue,
        6 => Color::Red,
        _ => Color::LightYellow,
    }
}

/// `m:ss`
pub fn clock_label(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn clock_style(phase: ClockPhase) -> Style {
    match phase {
        ClockPhase::Calm => Style::default().fg(Color::Green),
        ClockPhase::Alarm => bold().fg(Color::Yellow),
        ClockPhase::Urgent => bold().fg(Color::Red).add_modifier(Modifier::SLOW_BLINK),
    }
}

/// Combo counter, or nothing while the combo is too small to show.
pub fn combo_line(combo: u32) -> Line<'static> {
    let text = format!("Combo x{combo}");
    let style = match ComboBanner::for_combo(combo) {
        ComboBanner::Hidden => return Line::default(),
        ComboBanner::Warm => Style::default().fg(Color::Yellow),
        ComboBanner::Hot => bold().fg(Color::LightRed),
        ComboBanner::Blazing => bold().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ComboBanner::Rainbow => {
            let spans = text
                .chars()
                .enumerate()
                .map(|(i, c)| Span::styled(c.to_string(), bold().fg(RAINBOW[i % RAINBOW.len()])))
                .collect::<Vec<_>>();
            return Line::from(spans).alignment(Alignment::Center);
        }
    };
    Line::from(Span::styled(text, style)).alignment(Alignment::Center)
}

fn band_color(band: Band) -> Color {
    match band {
        Band::Off => Color::DarkGray,
        Band::Red => Color::Red,
        Band::Yellow => Color::Yellow,
        Band::Green => Color::Green,
    }
}

/// The eight-block accuracy bar followed by the truncated percentage.
pub fn accuracy_line(accuracy: f64) -> Line<'static> {
    let tier = AccuracyTier::from_ratio(accuracy);
    let lit_style = Style::default().fg(band_color(tier.band));
    let mut spans = vec![Span::styled("Accuracy ", dim())];
    spans.extend((0..ACCURACY_BAR_BLOCKS).map(|i| {
        if i < tier.lit {
            Span::styled("■", lit_style)
        } else {
            Span::styled("□", Style::default().fg(Color::DarkGray))
        }
    }));
    let percent = (accuracy.clamp(0.0, 1.0) * 100.0) as u32;
    spans.push(Span::styled(format!(" {percent}%"), dim()));
    Line::from(spans).alignment(Alignment::Center)
}

/// The target sentence coloured by what has been typed so far.
pub fn sentence_line(text: &str, marks: &[Option<bool>]) -> Line<'static> {
    let green_bold = bold().fg(Color::Green);
    let red_bold = bold().fg(Color::Red);
    let cursor = marks.iter().position(Option::is_none);

    let spans = text
        .chars()
        .zip(marks)
        .enumerate()
        .map(|(idx, (expected, mark))| match mark {
            Some(true) => Span::styled(expected.to_string(), green_bold),
            Some(false) => Span::styled(
                match expected {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold,
            ),
            None if Some(idx) == cursor => Span::styled(
                expected.to_string(),
                bold().add_modifier(Modifier::DIM | Modifier::UNDERLINED),
            ),
            None => Span::styled(expected.to_string(), bold().add_modifier(Modifier::DIM)),
        })
        .collect::<Vec<_>>();
    Line::from(spans).alignment(Alignment::Center)
}

/// Rect of `width` x `height` centred in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_popup(title: &str, lines: Vec<Line<'static>>, width: u16, area: Rect, buf: &mut Buffer) {
    let popup = centered(area, width, lines.len() as u16 + 2);
    Clear.render(popup, buf);
    Paragraph::new(lines)
        .block(Block::bordered().title(title.to_string()).border_style(bold()))
        .wrap(Wrap { trim: false })
        .render(popup, buf);
}

fn render_settings(draft: u32, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("Countdown", bold())).alignment(Alignment::Center),
        Line::from(vec![
            Span::styled("◀ ", dim()),
            Span::styled(describe_countdown(draft), bold().fg(Color::Yellow)),
            Span::styled(" ▶", dim()),
        ])
        .alignment(Alignment::Center),
        Line::default(),
        Line::from(Span::styled("←/→ 1 second   ↑/↓ 10 seconds", dim()))
            .alignment(Alignment::Center),
        Line::from(Span::styled("enter save   esc cancel", dim())).alignment(Alignment::Center),
    ];
    render_popup(" Settings ", lines, 44, area, buf);
}

fn render_achievements(activation: &AchievementActivation, area: Rect, buf: &mut Buffer) {
    let unlocked = activation.list.iter().filter(|a| a.unlocked).count();
    let lines = activation
        .list
        .iter()
        .map(|a| {
            let (mark, style) = if a.unlocked {
                ("★", bold().fg(Color::Yellow))
            } else {
                ("☆", dim())
            };
            let mut spans = vec![
                Span::styled(format!("{mark} {:<22}", a.title), style),
                Span::styled(a.description.clone(), dim()),
            ];
            if activation.unlocked_now.contains(&a.id) {
                spans.push(Span::styled(" NEW", bold().fg(Color::Green)));
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();
    let title = format!(" Achievements {unlocked}/{} ", activation.list.len());
    render_popup(&title, lines, 72, area, buf);
}

fn render_quit_prompt(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("Quit this game?", bold())).alignment(Alignment::Center),
        Line::from("Your current progress will be gone.").alignment(Alignment::Center),
        Line::default(),
        Line::from(Span::styled("y quit   n keep playing", dim())).alignment(Alignment::Center),
    ];
    render_popup(" Quit ", lines, 44, area, buf);
}

/// Render celebration sparks on top of whatever is drawn
fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    for spark in celebration.sparks() {
        if spark.x < 0.0 || spark.y < 0.0 {
            continue;
        }
        let (x, y) = (spark.x as u16, spark.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = SPARK_COLORS[spark.color_index % SPARK_COLORS.len()];
        let life = 1.0 - spark.age / spark.max_age;
        let style = if spark.is_letter() || life > 0.7 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if life > 0.3 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&spark.symbol.to_string());
            cell.set_style(style);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::BoxedGame;
    use crate::config::{Config, ConfigStore};
    use crate::cue::{CueSink, SilentCues};
    use crate::dice::{Dice, ScriptedDice};
    use crate::game::Game;
    use crate::store::{MemoryStore, ScoreStore};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    struct NoConfig;

    impl ConfigStore for NoConfig {
        fn load(&self) -> Config {
            Config::default()
        }

        fn save(&self, _cfg: &Config) -> std::io::Result<()> {
            Ok(())
        }
    }

    pub(crate) fn test_app(script: Vec<usize>) -> App {
        let game: BoxedGame = Game::new(
            Box::new(MemoryStore::new()) as Box<dyn ScoreStore>,
            Box::new(SilentCues) as Box<dyn CueSink>,
            Box::new(ScriptedDice::new(script)) as Box<dyn Dice>,
            60,
        );
        App::new(game, Config::default(), Box::new(NoConfig))
    }

    pub(crate) fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    pub(crate) fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    pub(crate) fn render_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn clock_labels() {
        assert_eq!(clock_label(60), "1:00");
        assert_eq!(clock_label(59), "0:59");
        assert_eq!(clock_label(245), "4:05");
        assert_eq!(clock_label(0), "0:00");
    }

    #[test]
    fn combo_line_hidden_below_two() {
        assert!(combo_line(0).spans.is_empty());
        assert!(combo_line(1).spans.is_empty());
        assert_eq!(combo_line(2).spans.len(), 1);
        // rainbow colours each letter
        assert_eq!(combo_line(16).spans.len(), "Combo x16".len());
    }

    #[test]
    fn accuracy_bar_lights_by_tier() {
        let line = accuracy_line(0.45);
        let lit = line.spans.iter().filter(|s| s.content == "■").count();
        assert_eq!(lit, 3);
        assert_eq!(line.spans[1].style.fg, Some(Color::Yellow));
        assert!(line.spans.last().unwrap().content.contains("45%"));

        let full = accuracy_line(1.0);
        assert_eq!(full.spans.iter().filter(|s| s.content == "■").count(), 8);
        let none = accuracy_line(0.0);
        assert_eq!(none.spans.iter().filter(|s| s.content == "■").count(), 0);
    }

    #[test]
    fn sentence_line_marks_errors_and_cursor() {
        let marks = [Some(true), Some(false), None, None];
        let line = sentence_line("a bc", &marks);
        assert_eq!(line.spans[0].style.fg, Some(Color::Green));
        assert_eq!(line.spans[1].content, "·");
        assert_eq!(line.spans[1].style.fg, Some(Color::Red));
        assert!(line.spans[2]
            .style
            .add_modifier
            .contains(Modifier::UNDERLINED));
        assert!(!line.spans[3]
            .style
            .add_modifier
            .contains(Modifier::UNDERLINED));
    }

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 40, 40), area);
    }

    #[test]
    fn menu_screen_lists_keys() {
        let app = test_app(vec![]);
        let text = render_text(&app, 80, 24);
        assert!(text.contains("High score 0"));
        assert!(text.contains("1 minute"));
        assert!(text.contains("enter start"));
    }

    #[test]
    fn play_screen_shows_sentence_and_score() {
        let mut app = test_app(vec![0, 0, 0, 0, 0, 1]);
        press(&mut app, KeyCode::Enter);
        let text = render_text(&app, 80, 24);
        assert!(text.contains("Banana yum"));
        assert!(text.contains("Score 0"));
        assert!(text.contains("1:00"));

        type_text(&mut app, "Banana yum");
        let text = render_text(&app, 80, 24);
        assert!(text.contains("Tree swing"));
        assert!(text.contains("Score 1"));
        // the completed sentence is now a tower block
        assert!(text.contains("Banana yum"));
    }

    #[test]
    fn game_over_screen_shows_total_and_verdict() {
        let mut app = test_app(vec![0, 0, 0, 0, 0, 1]);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Banana yum");
        for _ in 0..600 {
            app.on_frame();
        }
        app.celebration.stop();
        let text = render_text(&app, 80, 24);
        assert!(text.contains("Time's up!"));
        assert!(text.contains("Total 2"));
        assert!(text.contains("new high score"));
    }

    #[test]
    fn overlays_render_over_the_menu() {
        let mut app = test_app(vec![]);
        press(&mut app, KeyCode::Char('o'));
        assert!(render_text(&app, 80, 24).contains("Settings"));
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('a'));
        let text = render_text(&app, 80, 24);
        assert!(text.contains("Achievements 0/10"));
        assert!(text.contains("The Great First Step"));
    }

    #[test]
    fn quit_prompt_renders_while_paused() {
        let mut app = test_app(vec![]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        let text = render_text(&app, 80, 24);
        assert!(text.contains("Quit this game?"));
    }

    #[test]
    fn tiny_terminals_do_not_panic() {
        let mut app = test_app(vec![]);
        for (w, h) in [(1, 1), (10, 3), (20, 5)] {
            render_text(&app, w, h);
        }
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Bana");
        press(&mut app, KeyCode::Esc);
        for (w, h) in [(1, 1), (10, 3), (20, 5), (200, 60)] {
            render_text(&app, w, h);
        }
    }

    #[test]
    fn celebration_draws_sparks() {
        let mut app = test_app(vec![]);
        app.celebration
            .start(80, 24, &mut rand::thread_rng());
        let text = render_text(&app, 80, 24);
        assert!(!text.trim().is_empty());
    }
}
