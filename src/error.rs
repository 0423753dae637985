use thiserror::Error;

use crate::TermInt;

#[derive(Error, Debug)]
pub enum MunchyError {
    #[error("Terminal is too small: need {needed_w}x{needed_h}, have {actual_w}x{actual_h}")]
    TerminalTooSmall {
        needed_w: TermInt,
        needed_h: TermInt,
        actual_w: TermInt,
        actual_h: TermInt,
    },

    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MunchyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_small_message_names_both_sizes() {
        let e = MunchyError::TerminalTooSmall { needed_w: 64, needed_h: 24, actual_w: 63, actual_h: 24 };
        assert_eq!(e.to_string(), "Terminal is too small: need 64x24, have 63x24");
    }
}
