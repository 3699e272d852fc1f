use slide48::error::Result;

use super::view::View;

pub(crate) trait Renderer {
    fn size_hint(&self) -> Result<(u16, u16)>;
    fn render(&mut self, view: &View) -> Result<()>;
    /// Hand the terminal back in a usable state after a failure.
    fn recover(&mut self);
}
