use super::*;
use ndarray::Array3;

fn gradient_frame(height: usize, width: usize, channels: usize) -> GameFrame {
    GameFrame::new(Array3::from_shape_fn(
        (height, width, channels),
        |(y, x, c)| ((y * 31 + x * 7 + c) % 256) as u8,
    ))
}

#[test]
fn test_dimensions() {
    let frame = gradient_frame(10, 16, 3);

    assert_eq!(frame.height(), 10);
    assert_eq!(frame.width(), 16);
    assert_eq!(frame.channels(), 3);
}

#[test]
fn test_image_conversion_keeps_pixels() {
    for channels in [1, 3, 4] {
        let frame = gradient_frame(5, 9, channels);

        let image = frame.to_image().unwrap();
        assert_eq!((image.width(), image.height()), (9, 5));

        let converted = GameFrame::from_image(image).unwrap();
        assert_eq!(converted.pixels(), frame.pixels());
    }
}

#[test]
fn test_two_channel_frames_are_rejected() {
    let frame = gradient_frame(4, 4, 2);

    assert!(matches!(
        frame.to_image().unwrap_err().variant,
        GameAgentErrorVariant::UnsupportedChannelCount(2)
    ));
}

#[test]
fn test_half_size_truncates_odd_dimensions() {
    let frame = gradient_frame(11, 17, 3);

    let half = frame.half_size().unwrap();

    assert_eq!((half.height(), half.width(), half.channels()), (5, 8, 3));
    assert_eq!(half.timestamp(), frame.timestamp());
}

#[test]
fn test_half_size_of_single_row_is_too_small() {
    let frame = gradient_frame(1, 8, 3);

    assert!(matches!(
        frame.half_size().unwrap_err().variant,
        GameAgentErrorVariant::FrameTooSmall {
            width: 8,
            height: 1
        }
    ));
}
