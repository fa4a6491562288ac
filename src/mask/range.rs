//! Two-value `A ~ B` masks built on the segment walker.
//!
//! The left value is walked until it is complete or the user types `~`.
//! Whatever follows is walked as the right value. The separator appears as
//! soon as the left side is done while inserting; on delete it is only kept
//! when the right side still has content. When both sides are complete and
//! real calendar values, they are printed in chronological order.

use super::segments::{tokenize, walk, SegmentLayout, Token};
use super::{EditIntent, MaskOptions, RANGE_SEPARATOR};

pub(crate) fn format_range(
    layout: &SegmentLayout,
    input: &str,
    intent: EditIntent,
    options: &MaskOptions,
) -> (String, bool) {
    let tokens = tokenize(input, layout, true);
    let left = walk(&tokens, layout, intent, options);

    // further range markers on the right only act as spaces
    let rest: Vec<Token> = tokens[left.consumed..]
        .iter()
        .map(|t| match t {
            Token::Range => Token::Space,
            other => *other,
        })
        .collect();
    let right = walk(&rest, layout, intent, options);

    let insert = intent.is_insert();
    let left_text = left.render(layout, insert && !left.stopped_at_range);
    let left_done = left.is_complete(layout) || left.stopped_at_range;

    if !left_done {
        return (left_text, false);
    }

    if right.is_empty() {
        let mut out = left_text;
        if insert && !left.is_empty() {
            out.push_str(RANGE_SEPARATOR);
        }
        return (out, false);
    }

    let right_text = right.render(layout, insert);
    let complete = left.is_complete(layout) && right.is_complete(layout);

    let reversed = match (left.sort_key(layout, options), right.sort_key(layout, options)) {
        (Some(start), Some(end)) => start > end,
        _ => false,
    };

    let (first, second) = if reversed {
        (right_text, left_text)
    } else {
        (left_text, right_text)
    };
    (format!("{first}{RANGE_SEPARATOR}{second}"), complete)
}

#[cfg(test)]
mod tests {
    use super::super::segments::{DATE, MONTH_YEAR, SHORT_MONTH_YEAR};
    use super::*;

    fn opts() -> MaskOptions {
        MaskOptions::new().with_current_year(2025)
    }

    fn insert(layout: &SegmentLayout, input: &str) -> String {
        format_range(layout, input, EditIntent::Insert, &opts()).0
    }

    fn delete(layout: &SegmentLayout, input: &str) -> String {
        format_range(layout, input, EditIntent::Delete, &opts()).0
    }

    #[test]
    fn test_range_typing_progression() {
        assert_eq!(insert(&DATE, "0101"), "01/01/");
        assert_eq!(insert(&DATE, "01012020"), "01/01/2020 ~ ");
        assert_eq!(insert(&DATE, "01/01/2020 ~ 3"), "01/01/2020 ~ 3");
        assert_eq!(insert(&DATE, "01/01/2020 ~ 31"), "01/01/2020 ~ 31/");
        assert_eq!(
            format_range(&DATE, "0101202031122020", EditIntent::Insert, &opts()),
            ("01/01/2020 ~ 31/12/2020".to_string(), true)
        );
    }

    #[test]
    fn test_reversed_range_is_reordered() {
        assert_eq!(
            insert(&DATE, "31/12/2020 ~ 01/01/2020"),
            "01/01/2020 ~ 31/12/2020"
        );
        assert_eq!(insert(&MONTH_YEAR, "12/2021 ~ 01/2020"), "01/2020 ~ 12/2021");
        assert_eq!(insert(&SHORT_MONTH_YEAR, "01/99 ~ 01/20"), "01/99 ~ 01/20");
        assert_eq!(insert(&SHORT_MONTH_YEAR, "01/20 ~ 01/99"), "01/99 ~ 01/20");
    }

    #[test]
    fn test_partial_right_side_is_not_reordered() {
        assert_eq!(insert(&DATE, "31/12/2020 ~ 01/01/20"), "31/12/2020 ~ 01/01/20");
    }

    #[test]
    fn test_invalid_calendar_date_is_not_reordered() {
        assert_eq!(
            insert(&DATE, "31/12/2020 ~ 31/02/2020"),
            "31/12/2020 ~ 31/02/2020"
        );
    }

    #[test]
    fn test_explicit_range_marker_closes_left_side() {
        assert_eq!(insert(&DATE, "01/01/20~"), "01/01/2020 ~ ");
        assert_eq!(insert(&DATE, "01/0~"), "01/0 ~ ");
        assert_eq!(insert(&DATE, "01/0 ~ 5"), "01/0 ~ 05/");
    }

    #[test]
    fn test_delete_drops_dangling_separator() {
        assert_eq!(delete(&DATE, "01/01/2020 ~"), "01/01/2020");
        assert_eq!(delete(&DATE, "01/01/2020 ~ 3"), "01/01/2020 ~ 3");
        assert_eq!(delete(&DATE, "01/01/2020 ~ 31/"), "01/01/2020 ~ 31");
    }

    #[test]
    fn test_empty_left_side() {
        assert_eq!(insert(&DATE, ""), "");
        assert_eq!(insert(&DATE, "~"), "");
        assert_eq!(insert(&DATE, " ~ 01/01/2020"), " ~ 01/01/2020");
    }

    #[test]
    fn test_reapplying_is_stable() {
        let inputs = [
            "0101202031122020",
            "3112202001012020",
            "01/0~5",
            "01/01/20~",
            "~~01",
            "01/01/2020 ~ 31/12/20 ~",
        ];
        for input in inputs {
            for layout in [&DATE, &MONTH_YEAR, &SHORT_MONTH_YEAR] {
                let once = insert(layout, input);
                assert_eq!(insert(layout, &once), once, "{input}");
                let once = delete(layout, input);
                assert_eq!(delete(layout, &once), once, "{input}");
            }
        }
    }
}
