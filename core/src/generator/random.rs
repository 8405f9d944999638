use super::*;
use rand::prelude::*;

/// Deals a fresh deck for `difficulty`: distinct symbols drawn from [`SYMBOLS`], each duplicated into a pair, then the
/// whole deck shuffled and numbered by position.
pub fn generate_cards<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Vec<Card> {
    let mut pairs = difficulty.pairs() as usize;
    if pairs > SYMBOLS.len() {
        log::warn!(
            "Symbol palette too small, requested {} pairs but only has {}",
            pairs,
            SYMBOLS.len()
        );
        pairs = SYMBOLS.len();
    }

    let mut palette = SYMBOLS;
    let (chosen, _) = palette.partial_shuffle(rng, pairs);

    let mut symbols: Vec<&'static str> = chosen.iter().flat_map(|&symbol| [symbol, symbol]).collect();
    symbols.shuffle(rng);

    symbols
        .into_iter()
        .enumerate()
        .map(|(index, symbol)| Card::new(CardId(index as u16), symbol))
        .collect()
}

/// Generation strategy that is purely random but reproducible from its seed.
///
/// The rng is seeded once, so successive deals from one generator differ.
#[derive(Clone, Debug)]
pub struct RandomDeckGenerator {
    rng: SmallRng,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(&mut self, difficulty: Difficulty) -> Vec<Card> {
        generate_cards(difficulty, &mut self.rng)
    }
}
