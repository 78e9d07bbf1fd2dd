use super::*;

#[test]
fn messages_name_the_problem() {
    assert_eq!(
        DecodeError::InvalidEscape {
            offset: 2,
            escape: 'a'
        }
        .to_string(),
        "invalid escape `\\a` at byte 2"
    );
    assert_eq!(
        DecodeError::InvalidUnicodeEscape { offset: 2 }.to_string(),
        "invalid unicode escape at byte 2"
    );
    assert_eq!(
        DecodeError::DanglingBackslash { offset: 2 }.to_string(),
        "dangling backslash at byte 2"
    );
}

#[test]
fn offset_accessor() {
    assert_eq!(DecodeError::DanglingBackslash { offset: 7 }.offset(), 7);
    assert_eq!(
        DecodeError::InvalidEscape {
            offset: 3,
            escape: 'q'
        }
        .offset(),
        3
    );
}
