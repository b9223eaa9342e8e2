use anyhow::Result;
use anywkt::read::{read_str, write_string};

const INPUT: &str = include_str!("t-input.wkt");
const EXPECTED: &str = include_str!("t-expected.wkt");

#[test]
fn t1() -> Result<()> {
    assert_eq!(INPUT.lines().count(), EXPECTED.lines().count());
    for (input, expected) in INPUT.lines().zip(EXPECTED.lines()) {
        let g = read_str(input)?;
        assert_eq!(write_string(&g), expected, "for input {input:?}");
    }
    Ok(())
}
