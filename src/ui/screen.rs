//! Screen composer: the list, its sticky header, the scroll readout and the
//! key hint bar, drawn back to front.

use ratatui::{
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::core::geometry::Dp;
use crate::core::scroll::ScrollSource;

use super::{
    debug_overlay::DebugReadout,
    layout::AppLayout,
    list_widget::ProfileList,
    painter::{rows_for, ScenePainter},
    theme::Theme,
};

/// Draw one frame.  Records where the header landed for mouse hit-testing.
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    state.set_viewport_rows(layout.list_area.height);

    frame.render_widget(ProfileList::new(&state.list), layout.list_area);

    let scene = state
        .header
        .compose(Dp(layout.list_area.width as f32 * state.scale));
    let header_area = layout.header_area(rows_for(scene.height, state.scale));
    frame.render_widget(Clear, header_area);
    frame.render_widget(Block::default().style(Theme::surface_style()), header_area);
    frame.render_widget(
        ScenePainter::new(&scene, state.scale, &state.avatar, Theme::SURFACE),
        header_area,
    );
    state.header_area = Some(header_area);

    frame.render_widget(
        DebugReadout {
            visible: state.show_debug,
            position: state.list.position(),
        },
        layout.list_area,
    );

    let status = Paragraph::new(state.config.status_hint()).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}
