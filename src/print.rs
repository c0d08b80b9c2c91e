//! Groups a [`ProbabilityMap`] into display categories and renders them as a console table.

use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::domain::{Bound, DoubleChance, Line, Market, Side, Sign, Tally};
use crate::engine::{ProbabilityMap, HANDICAPS};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub title: &'static str,
    pub entries: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEntry {
    pub market: Market,
    pub label: String,
    pub prob: f64,
    /// Set on every entry that attains the category's maximum, provided it is positive.
    pub highlighted: bool,
}

/// The largest total line shown in the goals category.
const MAX_DISPLAYED_GOALS_LINE: Line = Line(4);

fn category_layout() -> Vec<(&'static str, Vec<Market>)> {
    let totals = |tally: Tally, bound: Bound| {
        tally
            .lines()
            .map(move |line| Market::Total(tally, bound, line))
            .collect::<Vec<_>>()
    };
    let goals = [Bound::Over, Bound::Under]
        .into_iter()
        .flat_map(|bound| {
            Tally::Goals
                .lines()
                .filter(|line| *line <= MAX_DISPLAYED_GOALS_LINE)
                .map(move |line| Market::Total(Tally::Goals, bound, line))
        })
        .collect::<Vec<_>>();
    let handicaps = HANDICAPS
        .into_iter()
        .flat_map(|handicap| {
            [
                Market::AsianHandicap(Side::Home, Sign::Minus, handicap),
                Market::AsianHandicap(Side::Home, Sign::Plus, handicap),
                Market::AsianHandicap(Side::Away, Sign::Minus, handicap),
                Market::AsianHandicap(Side::Away, Sign::Plus, handicap),
            ]
        })
        .collect::<Vec<_>>();

    vec![
        (
            "Probabilidades Principais",
            vec![
                Market::Win(Side::Home),
                Market::Draw,
                Market::Win(Side::Away),
                Market::DoubleChance(DoubleChance::HomeOrDraw),
                Market::DoubleChance(DoubleChance::AwayOrDraw),
                Market::DoubleChance(DoubleChance::HomeOrAway),
            ],
        ),
        ("Gols no Jogo", goals),
        ("Escanteios Acima", totals(Tally::Corners, Bound::Over)),
        ("Escanteios Abaixo", totals(Tally::Corners, Bound::Under)),
        ("Cartões Amarelos Acima", totals(Tally::Cards, Bound::Over)),
        ("Cartões Amarelos Abaixo", totals(Tally::Cards, Bound::Under)),
        (
            "Ambos Marcam",
            vec![Market::BothTeamsToScore(true), Market::BothTeamsToScore(false)],
        ),
        ("Handicap Asiático", handicaps),
    ]
}

pub fn categorise(map: &ProbabilityMap) -> Vec<Category> {
    category_layout()
        .into_iter()
        .map(|(title, markets)| {
            let mut entries = markets
                .into_iter()
                .filter_map(|market| {
                    map.get(&market).map(|prob| CategoryEntry {
                        market,
                        label: market.label(map.teams()).to_string(),
                        prob,
                        highlighted: false,
                    })
                })
                .collect::<Vec<_>>();
            let max = entries
                .iter()
                .map(|entry| entry.prob)
                .fold(f64::NEG_INFINITY, f64::max);
            if max > 0.0 {
                for entry in &mut entries {
                    entry.highlighted = entry.prob == max;
                }
            }
            Category { title, entries }
        })
        .collect()
}

pub fn tabulate(categories: &[Category]) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Left)),
        Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
        Col::new(Styles::default().with(MinWidth(1)).with(HAlign::Centred)),
    ]);
    for category in categories {
        table.push_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![category.title.into(), "".into(), "".into()],
        ));
        for entry in &category.entries {
            table.push_row(Row::new(
                Styles::default(),
                vec![
                    entry.label.clone().into(),
                    format!("{:.1}%", entry.prob).into(),
                    (if entry.highlighted { "*" } else { "" }).into(),
                ],
            ));
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Score, Teams};
    use crate::engine::calculate;
    use crate::input::RawInput;
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    fn sample() -> ProbabilityMap {
        calculate(&RawInput::new(Teams::new("Arsenal", "Chelsea"), 45.0, Score::new(1, 0), ""))
    }

    #[test]
    fn category_sizes() {
        let categories = categorise(&sample());
        let sizes = categories
            .iter()
            .map(|category| (category.title, category.entries.len()))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                ("Probabilidades Principais", 6),
                ("Gols no Jogo", 10),
                ("Escanteios Acima", 12),
                ("Escanteios Abaixo", 12),
                ("Cartões Amarelos Acima", 9),
                ("Cartões Amarelos Abaixo", 9),
                ("Ambos Marcam", 2),
                ("Handicap Asiático", 40),
            ],
            sizes
        );
    }

    #[test]
    fn highlights_every_maximum() {
        let categories = categorise(&sample());
        let main = &categories[0];
        let highlighted = main
            .entries
            .iter()
            .filter(|entry| entry.highlighted)
            .map(|entry| entry.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(vec!["Arsenal ou Chelsea"], highlighted);

        let handicaps = &categories[7];
        assert_eq!("Handicap Asiático Arsenal -0.25", handicaps.entries[0].label);
        assert!(handicaps
            .entries
            .iter()
            .filter(|entry| entry.highlighted)
            .all(|entry| entry.prob == 99.9));
    }

    #[test]
    fn nothing_highlighted_when_all_zero() {
        let mut map = ProbabilityMap::with_capacity(Teams::default(), 2);
        map.insert(Market::BothTeamsToScore(true), 0.0);
        map.insert(Market::BothTeamsToScore(false), 0.0);
        let categories = categorise(&map);
        let btts = &categories[6];
        assert_eq!(2, btts.entries.len());
        assert!(btts.entries.iter().all(|entry| !entry.highlighted));
        assert!(categories[0].entries.is_empty());
    }

    #[test]
    fn renders_table() {
        let table = tabulate(&categorise(&sample()));
        let rendered = Console::default().render(&table).to_string();
        assert!(rendered.contains("Probabilidades Principais"));
        assert!(rendered.contains("Vitória Arsenal"));
        assert!(rendered.contains("42.6%"));
    }
}
