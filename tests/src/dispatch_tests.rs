//! Dispatch-table tests, independent of any hardware

use rstest::rstest;
use tap_core::{codes, Key, KeypadConfig, TextEntry};

#[rstest]
#[case(codes::ABC, "abc")]
#[case(codes::DEF, "def")]
#[case(codes::GHI, "ghi")]
#[case(codes::JKL, "jkl")]
#[case(codes::MNO, "mno")]
#[case(codes::PQRS, "pqrs")]
#[case(codes::TUV, "tuv")]
#[case(codes::WXYZ, "wxyz")]
fn letter_codes_map_to_their_groups(#[case] code: u16, #[case] group: &'static str) {
    assert_eq!(Key::from_code(code), Some(Key::Letters(group)));
    assert!(!Key::Letters(group).is_modifier());
}

#[rstest]
#[case(codes::CAPS_LOCK, Key::CapsLock)]
#[case(codes::DELETE, Key::Delete)]
#[case(codes::SEND, Key::Send)]
fn control_codes_are_modifiers(#[case] code: u16, #[case] expected: Key) {
    assert_eq!(Key::from_code(code), Some(expected));
    assert!(expected.is_modifier());
}

#[test]
fn space_maps_but_does_not_modify() {
    assert_eq!(Key::from_code(codes::SPACE), Some(Key::Space));
    assert!(!Key::Space.is_modifier());
}

#[rstest]
#[case(0x000)]
#[case(0x123)]
#[case(0xFFF)]
fn unknown_codes_are_unmapped(#[case] code: u16) {
    assert_eq!(Key::from_code(code), None);
}

#[rstest]
#[case(1, 'a')]
#[case(2, 'b')]
#[case(3, 'c')]
#[case(4, 'a')]
#[case(7, 'a')]
fn cycling_wraps_modulo_group_size(#[case] presses: u32, #[case] expected: char) {
    let config = KeypadConfig::default();
    let mut entry = TextEntry::new(&config);
    let mut queue: heapless::spsc::Queue<tap_core::Action, 64> = heapless::spsc::Queue::new();
    let (mut producer, _consumer) = queue.split();

    for i in 0..presses {
        entry.press(codes::ABC, 1000 + i * 100, &mut producer);
    }
    assert_eq!(entry.pending(), Some(expected));
}
