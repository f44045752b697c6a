//! Data models for the school website content backend.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod board;
mod document;
mod image;
mod staff;
mod vacancy;

pub use board::*;
pub use document::*;
pub use image::*;
pub use staff::*;
pub use vacancy::*;

/// Render a byte count the way the frontend displays it ("1 KB", "2.5 MB").
pub fn format_file_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes <= 0 {
        return "0 Bytes".to_string();
    }

    let exponent = (((bytes as f64).ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    // parseFloat(value.toFixed(2)) semantics: round to 2 places, drop trailing zeros
    let mut rendered = format!("{:.2}", value);
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }

    format!("{} {}", rendered, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn test_format_file_size_boundaries() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn test_format_file_size_fractional() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(2_621_440), "2.5 MB");
    }

    #[test]
    fn test_format_file_size_rounds_to_two_places() {
        // 1234567 / 1048576 = 1.17737...
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }
}
