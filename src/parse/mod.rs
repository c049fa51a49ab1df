pub mod marker;

pub use marker::{
    TagMarker, category_scan_re, category_strip_re, display_text, format_marker, marker_span,
    parse_marker, strip_marker,
};
