use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    session::TowerBlock,
    skin::{scale_factor, InitialBlock, TowerTier},
    ui::family_color,
};

/// Rows one block takes; blocks flatten as the tower grows.
pub fn block_rows(tower_len: usize) -> u16 {
    match scale_factor(tower_len) {
        1 => 3,
        2 => 2,
        _ => 1,
    }
}

pub fn block_style(initial: InitialBlock, index: usize) -> Style {
    let base = Style::default().fg(Color::Black).bg(family_color(initial));
    let tier = if index == 0 {
        Modifier::empty()
    } else {
        match TowerTier::for_index(index) {
            TowerTier::Building => Modifier::empty(),
            TowerTier::Intermediate => Modifier::BOLD,
            TowerTier::Advanced => Modifier::BOLD | Modifier::ITALIC,
            TowerTier::Pro => Modifier::BOLD | Modifier::UNDERLINED,
            TowerTier::Elite => Modifier::BOLD | Modifier::UNDERLINED | Modifier::ITALIC,
            TowerTier::Master => Modifier::BOLD | Modifier::SLOW_BLINK,
        }
    };
    base.add_modifier(tier)
}

/// The tower, bottom block first. Only the top blocks that fit are drawn.
pub struct TowerView<'a> {
    pub blocks: &'a [TowerBlock],
    pub initial: InitialBlock,
}

impl Widget for TowerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = block_rows(self.blocks.len());
        if area.width < 4 || area.height < rows {
            return;
        }
        let fit = (area.height / rows) as usize;
        let hidden = self.blocks.len().saturating_sub(fit);

        for (slot, (index, block)) in self.blocks.iter().enumerate().skip(hidden).enumerate() {
            let label = block.sentence.text;
            let width = (label.width() as u16 + 4).min(area.width);
            let x = area.x + (area.width - width) / 2;
            let y = area.bottom() - (slot as u16 + 1) * rows;
            let style = block_style(self.initial, index);

            buf.set_style(Rect::new(x, y, width, rows), style);
            buf.set_stringn(x + 2, y + rows / 2, label, (width - 4) as usize, style);
        }
    }
}
