mod computed;
mod values;

pub use computed::{
    ComputedStyle, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, compute_style, computed_style,
};
pub use values::{
    Display, Length, Position, format_px, parse_display, parse_font_weight, parse_length,
    parse_letter_spacing, parse_position,
};
