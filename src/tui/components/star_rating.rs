//! Five-star rating selector.

use crate::review::Rating;

use super::layout::Row;

const FILLED: &str = "★";
const EMPTY: &str = "☆";

/// Star selector showing the current rating.
#[derive(Debug, Clone, Copy)]
pub struct StarRating {
    rating: Rating,
    focused: bool,
}

impl StarRating {
    /// Selector for `rating`.
    #[must_use]
    pub const fn new(rating: Rating) -> Self {
        Self {
            rating,
            focused: false,
        }
    }

    /// Marks the selector as focused.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Star glyphs for the rating, filled up to the selected star.
    #[must_use]
    pub fn stars(&self) -> String {
        Rating::all()
            .map(|star| if star <= self.rating { FILLED } else { EMPTY })
            .collect()
    }

    /// The selector as a pressable row that emits `on_press`.
    #[must_use]
    pub fn row<M: Clone>(&self, on_press: M) -> Row<M> {
        Row::new()
            .child("Rating")
            .child(self.stars())
            .child(format!("{}/{}", self.rating, Rating::MAX))
            .with_on_press(on_press)
            .focused(self.focused)
    }

    /// Renders the selector.
    #[must_use]
    pub fn view<M: Clone>(&self, on_press: M) -> String {
        self.row(on_press).render()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::StarRating;
    use crate::review::Rating;

    #[rstest]
    #[case(1, "★☆☆☆☆")]
    #[case(3, "★★★☆☆")]
    #[case(5, "★★★★★")]
    fn fills_stars_up_to_rating(#[case] value: u8, #[case] expected: &str) {
        let rating = Rating::new(value).expect("valid rating");

        assert_eq!(StarRating::new(rating).stars(), expected);
    }

    #[test]
    fn focused_view_has_marker_and_count() {
        let rating = Rating::new(4).expect("valid rating");

        let view = StarRating::new(rating).focused(true).view(());

        assert_eq!(view, "▸ Rating ★★★★☆ 4/5");
    }
}
