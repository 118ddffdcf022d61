//! Segment classification and word rounding.

use rstest::rstest;
use spim_core::common::Segment;
use spim_core::common::constants::{round_down_word, round_up_word};

#[rstest]
#[case(0x0000_0000, None)]
#[case(0x003f_fffc, None)]
#[case(0x0040_0000, Some(Segment::Text))]
#[case(0x0fff_fffc, Some(Segment::Text))]
#[case(0x1000_0000, Some(Segment::Data))]
#[case(0x7fff_fffc, Some(Segment::Data))]
#[case(0x8000_0000, Some(Segment::KernelText))]
#[case(0x8000_0180, Some(Segment::KernelText))]
#[case(0x9000_0000, Some(Segment::KernelData))]
#[case(0xffff_0000, Some(Segment::MappedIo))]
#[case(0xffff_000c, Some(Segment::MappedIo))]
#[case(0xffff_0010, None)]
fn classify_follows_spim_layout(#[case] addr: u32, #[case] expected: Option<Segment>) {
    assert_eq!(Segment::classify(addr), expected);
}

#[rstest]
#[case(Segment::Text, 0x1000_0000)]
#[case(Segment::Data, 0x8000_0000)]
#[case(Segment::KernelText, 0x9000_0000)]
#[case(Segment::KernelData, 0xffff_0000)]
#[case(Segment::MappedIo, 0xffff_0010)]
fn segment_limit_is_next_segment_base(#[case] segment: Segment, #[case] limit: u32) {
    assert_eq!(segment.limit(), limit);
    assert_eq!(Segment::classify(limit - 4), Some(segment));
}

#[rstest]
#[case(0, 0, 0)]
#[case(1, 0, 4)]
#[case(4, 4, 4)]
#[case(7, 4, 8)]
#[case(0x7fff_effd, 0x7fff_effc, 0x7fff_f000)]
fn word_rounding(#[case] value: u32, #[case] down: u32, #[case] up: u32) {
    assert_eq!(round_down_word(value), down);
    assert_eq!(round_up_word(value), up);
}

#[test]
fn round_up_saturates_at_top_of_address_space() {
    assert_eq!(round_up_word(u32::MAX), 0xffff_fffc);
}
