use super::*;
use ndarray::Array3;

fn numbered_frame(number: u8) -> GameFrame {
    GameFrame::new(Array3::from_elem((1, 1, 1), number))
}

fn numbers(buffer: &GameFrameBuffer) -> Vec<u8> {
    buffer
        .frames()
        .map(|frame| frame.pixels()[[0, 0, 0]])
        .collect()
}

#[test]
fn test_buffer_never_exceeds_capacity() {
    for capacity in 1..=6 {
        let mut buffer = GameFrameBuffer::new(capacity);
        for total in 1..=20u8 {
            buffer.add_game_frame(numbered_frame(total));
            assert!(buffer.len() <= capacity);
            assert_eq!(buffer.len(), (total as usize).min(capacity));
            if total as usize > capacity {
                // The oldest retained frame is frame number total - capacity + 1.
                assert_eq!(numbers(&buffer)[0] as usize, total as usize - capacity + 1);
            }
        }
    }
}

#[test]
fn test_frames_are_oldest_first() {
    let mut buffer = GameFrameBuffer::new(3);
    for number in [4, 8, 15, 16, 23] {
        buffer.add_game_frame(numbered_frame(number));
    }

    assert_eq!(numbers(&buffer), vec![15, 16, 23]);
    assert_eq!(
        buffer
            .snapshot()
            .iter()
            .map(|frame| frame.pixels()[[0, 0, 0]])
            .collect::<Vec<_>>(),
        vec![15, 16, 23]
    );
}

#[test]
fn test_latest_and_previous() {
    let mut buffer = GameFrameBuffer::default();
    assert_eq!(buffer.capacity(), DEFAULT_GAME_FRAME_BUFFER_SIZE);
    assert!(buffer.latest().is_none());
    assert!(buffer.previous(0).is_none());

    for number in 1..=3 {
        buffer.add_game_frame(numbered_frame(number));
    }

    assert_eq!(buffer.latest().unwrap().pixels()[[0, 0, 0]], 3);
    assert_eq!(buffer.previous(0), buffer.latest());
    assert_eq!(buffer.previous(2).unwrap().pixels()[[0, 0, 0]], 1);
    assert!(buffer.previous(3).is_none());
}
