use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::{
    app::App,
    config::describe_countdown,
    session::Phase,
    skin::skin_name,
    tiers::{ClockPhase, Verdict},
    ui::{
        accuracy_line, backdrop_accent, clock_label, clock_style, combo_line, family_color,
        sentence_line, tower::TowerView, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
    },
};

/// A UI Screen boundary: one per session phase
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Title screen shown while idle
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let session = app.game.session();
        let accent = backdrop_accent(session.backdrop());
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        let lines = vec![
            Line::from(Span::styled("T Y P E Z E N I T H", bold.fg(accent))),
            Line::default(),
            Line::from(Span::styled(
                format!("High score {}", session.high_score()),
                bold,
            )),
            Line::from(format!(
                "Countdown {}",
                describe_countdown(app.game.countdown_setting())
            )),
            Line::from(Span::styled(
                format!("First block {}", session.initial_block().name()),
                Style::default().fg(family_color(session.initial_block())),
            )),
            Line::default(),
            Line::from(Span::styled(
                "enter start   o settings   a achievements   q quit",
                dim,
            )),
        ];

        let area = f.area();
        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(top), Constraint::Min(0)])
            .split(area);

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[1],
        );
    }
}

/// The running session: HUD, tower, accuracy bar and the sentence to type
pub struct PlayScreen;

impl Screen for PlayScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let session = app.game.session();
        let dim = Style::default().add_modifier(Modifier::DIM);
        let accent = backdrop_accent(session.backdrop());

        let frame = Block::bordered()
            .title(" TypeZenith ")
            .border_style(Style::default().fg(accent));
        let inner = frame.inner(f.area());
        f.render_widget(frame, f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // score + clock
                Constraint::Length(1), // combo
                Constraint::Min(1),    // tower
                Constraint::Length(1), // accuracy
                Constraint::Length(1), // sentence
                Constraint::Length(1), // input
                Constraint::Length(1), // hints
            ])
            .split(inner);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(chunks[0]);

        let height = session.tower_height();
        let top_skin = skin_name(
            Some(session.initial_block().name().as_str()),
            height.saturating_sub(1),
        );
        let score = Line::from(vec![
            Span::styled(
                format!("Score {}", session.score()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   High {}", session.high_score())),
            Span::styled(format!("   Tower {height} ({top_skin})"), dim),
        ]);
        f.render_widget(Paragraph::new(score), header[0]);

        let phase =
            ClockPhase::for_countdown(session.countdown_remaining(), session.countdown_configured());
        let clock = Paragraph::new(Span::styled(
            clock_label(session.countdown_remaining()),
            clock_style(phase),
        ))
        .alignment(Alignment::Right);
        f.render_widget(clock, header[1]);

        f.render_widget(Paragraph::new(combo_line(session.combo())), chunks[1]);
        f.render_widget(
            TowerView {
                blocks: session.tower(),
                initial: session.initial_block(),
            },
            chunks[2],
        );
        f.render_widget(Paragraph::new(accuracy_line(session.accuracy())), chunks[3]);

        let target = session.sentence();
        f.render_widget(
            Paragraph::new(sentence_line(target.text, &session.marks())),
            chunks[4],
        );
        f.render_widget(
            Paragraph::new(Span::styled(format!("> {}", session.input()), dim))
                .alignment(Alignment::Center),
            chunks[5],
        );
        f.render_widget(
            Paragraph::new(Span::styled("esc quit", dim)).alignment(Alignment::Right),
            chunks[6],
        );
    }
}

/// Result screen after the countdown runs out
pub struct GameOverScreen;

impl Screen for GameOverScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let session = app.game.session();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);
        let verdict = Verdict::judge(session.total_score(), session.high_score());

        let mut lines = vec![
            Line::from(Span::styled("Time's up!", bold)),
            Line::default(),
            Line::from(Span::styled(
                format!("Total {}", session.total_score()),
                bold.fg(backdrop_accent(session.backdrop())),
            )),
            Line::from(Span::styled(
                format!(
                    "score {} + tower {}",
                    session.score(),
                    session.tower_height()
                ),
                dim,
            )),
            Line::from(format!("High score {}", session.high_score())),
            Line::default(),
            Line::from(Span::styled(verdict.headline(), bold)),
        ];
        if let Some(tagline) = verdict.tagline() {
            lines.push(Line::from(Span::styled(
                tagline,
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("enter play again   q quit", dim)));

        let area = f.area();
        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([Constraint::Length(top), Constraint::Min(0)])
            .split(area);

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[1],
        );
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Idle => Box::new(MenuScreen),
        Phase::Running => Box::new(PlayScreen),
        Phase::Over => Box::new(GameOverScreen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::{press, render_text, test_app, type_text};
    use crossterm::event::KeyCode;

    #[test]
    fn menu_shows_the_first_block() {
        // initial block roll 2 -> family 3
        let app = test_app(vec![2, 0]);
        assert!(render_text(&app, 80, 24).contains("First block initialBlock3"));
    }

    #[test]
    fn play_hud_names_the_top_skin() {
        let mut app = test_app(vec![0, 0, 0, 3, 0, 1]);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Banana yum");
        let text = render_text(&app, 80, 24);
        assert!(text.contains("Tower 1 (initialBlock4)"));
    }

    #[test]
    fn game_over_shows_the_breakdown() {
        let mut app = test_app(vec![0, 0, 0, 0, 0, 1, 2]);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Banana yum");
        type_text(&mut app, "Tree swing");
        for _ in 0..600 {
            app.on_frame();
        }
        app.celebration.stop();
        let text = render_text(&app, 80, 24);
        assert!(text.contains("score 3 + tower 2"));
        assert!(text.contains("Total 5"));
    }
}
