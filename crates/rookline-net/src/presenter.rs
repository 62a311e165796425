//! Output surface driven by the session driver

use rookline_core::{Position, Side};
use rookline_sync::Notice;

/// Where rendered boards, move text and status messages go
///
/// Board rendering and widgets live outside this crate; implement this for
/// whatever UI hosts the game.
pub trait Presenter {
    /// Draw `position` seen from `orientation`'s side of the board
    fn render(&mut self, position: &Position, orientation: Side);

    /// Replace the move list text
    fn show_moves(&mut self, movetext: &str);

    /// Show a status message
    fn notify(&mut self, notice: &Notice);
}
