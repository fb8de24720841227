use iced::widget::{button, container, scrollable, text, Column, Row, Space};
use iced::{Alignment, Element, Length};
use std::path::Path;

use crate::config::SIDEBAR_WIDTH;
use crate::state::tree::{SidebarTree, TreeRow};
use crate::Message;

/// Indentation per tree level
const INDENT: f32 = 16.0;

fn row_view<'a>(row: TreeRow, selected: &Path) -> Element<'a, Message> {
    let arrow = if row.expanded { "▾" } else { "▸" };
    let toggle = button(text(arrow).size(14))
        .padding([2, 6])
        .style(button::text)
        .on_press(Message::FolderToggled(row.path.clone()));

    let style = if row.path == selected {
        button::primary
    } else {
        button::text
    };
    let label = button(text(row.label).size(14))
        .padding([2, 6])
        .style(style)
        .on_press(Message::FolderSelected(row.path));

    Row::new()
        .push(Space::with_width(INDENT * row.depth as f32))
        .push(toggle)
        .push(label)
        .align_y(Alignment::Center)
        .into()
}

/// Folder tree with expand arrows; `selected` is highlighted
pub fn view<'a>(tree: &SidebarTree, selected: &Path) -> Element<'a, Message> {
    let header = text(format!("Folders in {}", tree.root().name)).size(16);

    let rows = Column::with_children(tree.visible().into_iter().map(|row| row_view(row, selected))).spacing(2);

    container(
        Column::new()
            .push(header)
            .push(scrollable(rows).height(Length::Fill))
            .spacing(8),
    )
    .padding(8)
    .width(Length::Fixed(SIDEBAR_WIDTH))
    .height(Length::Fill)
    .style(container::bordered_box)
    .into()
}
