/// Display palette.
///
/// Hex colors understood by the render host. Every classification in the
/// crate maps onto one of these.

pub type Color = &'static str;

pub const WHITE: Color = "#FFFFFF";
pub const GRAY: Color = "#808080";
pub const LIGHT_GRAY: Color = "#C0C0C0";
pub const DARK_GRAY: Color = "#404040";

pub const RED: Color = "#FF0000";
pub const ORANGE: Color = "#FF8C00";
pub const YELLOW: Color = "#FFFF00";
pub const DARK_YELLOW: Color = "#CCAA00";
pub const YELLOW_GREEN: Color = "#ADFF2F";
pub const LIGHT_GREEN: Color = "#90EE90";
pub const GREEN: Color = "#00FF00";
pub const BLUE: Color = "#4A90E2";
pub const CYAN: Color = "#00BFFF";
