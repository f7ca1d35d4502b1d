//! Stimulus catalog.
//!
//! Holds the fixed pool of positive pairs for every relationship type and
//! generates lookalike pairs: plausible near misses that never satisfy the
//! relationship. Word pools are literal lists; numeric and clock pools are
//! generated once when the catalog is built.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::domain::models::{RelationshipType, StimulusPair};

/// `(part, whole)`.
const PART_WHOLE: &[(&str, &str)] = &[
    ("wheel", "car"),
    ("engine", "car"),
    ("windshield", "car"),
    ("pedal", "bicycle"),
    ("handlebar", "bicycle"),
    ("spoke", "wheel"),
    ("fuselage", "airplane"),
    ("propeller", "airplane"),
    ("cockpit", "airplane"),
    ("hull", "ship"),
    ("mast", "sailboat"),
    ("sail", "sailboat"),
    ("finger", "hand"),
    ("knuckle", "hand"),
    ("toe", "foot"),
    ("pupil", "eye"),
    ("eyelash", "eye"),
    ("earlobe", "ear"),
    ("tooth", "mouth"),
    ("nostril", "nose"),
    ("elbow", "arm"),
    ("knee", "leg"),
    ("roof", "house"),
    ("chimney", "house"),
    ("room", "house"),
    ("doorknob", "door"),
    ("hinge", "door"),
    ("brick", "wall"),
    ("balcony", "apartment"),
    ("petal", "flower"),
    ("stem", "flower"),
    ("leaf", "tree"),
    ("bark", "tree"),
    ("root", "plant"),
    ("thorn", "rose"),
    ("core", "apple"),
    ("peel", "banana"),
    ("yolk", "egg"),
    ("page", "book"),
    ("chapter", "novel"),
    ("verse", "poem"),
    ("key", "keyboard"),
    ("keyboard", "laptop"),
    ("lens", "camera"),
    ("strap", "watch"),
    ("pendulum", "clock"),
    ("blade", "knife"),
    ("bristle", "toothbrush"),
    ("lid", "jar"),
    ("string", "guitar"),
    ("sleeve", "shirt"),
    ("collar", "shirt"),
    ("sole", "shoe"),
    ("zipper", "jacket"),
    ("brim", "hat"),
    ("fin", "fish"),
    ("scale", "fish"),
    ("feather", "bird"),
    ("beak", "bird"),
    ("hoof", "horse"),
    ("tusk", "elephant"),
    ("trunk", "elephant"),
    ("mane", "lion"),
    ("shell", "turtle"),
    ("slice", "pizza"),
    ("minute", "hour"),
    ("day", "week"),
    ("month", "year"),
    ("rung", "ladder"),
    ("cushion", "sofa"),
    ("drawer", "desk"),
];

/// Associated items where neither is a part of the other.
const PART_WHOLE_DECOYS: &[(&str, &str)] = &[
    ("rain", "umbrella"),
    ("key", "lock"),
    ("hammer", "nail"),
    ("bee", "flower"),
    ("sock", "shoe"),
    ("milk", "cow"),
    ("bread", "butter"),
    ("fish", "river"),
    ("pen", "paper"),
    ("ticket", "train"),
    ("passenger", "bus"),
    ("chalk", "blackboard"),
    ("paint", "brush"),
    ("ball", "bat"),
    ("cup", "saucer"),
    ("needle", "thread"),
    ("nest", "bird"),
    ("soap", "water"),
    ("letter", "envelope"),
    ("rider", "horse"),
];

const ANTONYMS: &[(&str, &str)] = &[
    ("hot", "cold"),
    ("big", "small"),
    ("up", "down"),
    ("light", "dark"),
    ("fast", "slow"),
    ("happy", "sad"),
    ("early", "late"),
    ("open", "closed"),
    ("full", "empty"),
    ("old", "young"),
    ("rich", "poor"),
    ("hard", "soft"),
    ("wet", "dry"),
    ("loud", "quiet"),
    ("thick", "thin"),
    ("high", "low"),
    ("strong", "weak"),
    ("tall", "short"),
    ("heavy", "light"),
    ("win", "lose"),
    ("buy", "sell"),
    ("give", "take"),
    ("push", "pull"),
    ("begin", "end"),
    ("arrive", "depart"),
    ("accept", "reject"),
    ("ancient", "modern"),
    ("asleep", "awake"),
    ("brave", "cowardly"),
    ("clean", "dirty"),
    ("deep", "shallow"),
    ("easy", "difficult"),
    ("entrance", "exit"),
    ("friend", "enemy"),
    ("generous", "stingy"),
    ("guilty", "innocent"),
    ("healthy", "sick"),
    ("inside", "outside"),
    ("left", "right"),
    ("maximum", "minimum"),
    ("narrow", "wide"),
    ("north", "south"),
    ("east", "west"),
    ("optimist", "pessimist"),
    ("past", "future"),
    ("polite", "rude"),
    ("question", "answer"),
    ("remember", "forget"),
    ("safe", "dangerous"),
    ("sharp", "dull"),
    ("sweet", "sour"),
    ("true", "false"),
    ("victory", "defeat"),
    ("visible", "invisible"),
    ("war", "peace"),
    ("wise", "foolish"),
    ("day", "night"),
    ("love", "hate"),
    ("smooth", "rough"),
    ("increase", "decrease"),
    ("above", "below"),
    ("before", "after"),
    ("always", "never"),
    ("first", "last"),
    ("import", "export"),
    ("majority", "minority"),
    ("shrink", "grow"),
    ("tight", "loose"),
    ("cheap", "expensive"),
    ("rise", "fall"),
    ("attack", "defend"),
    ("borrow", "lend"),
    ("dawn", "dusk"),
    ("float", "sink"),
];

/// Related words that are not opposites.
const ANTONYM_DECOYS: &[(&str, &str)] = &[
    ("big", "large"),
    ("small", "tiny"),
    ("fast", "quick"),
    ("happy", "glad"),
    ("begin", "start"),
    ("end", "finish"),
    ("hot", "warm"),
    ("cold", "cool"),
    ("rich", "wealthy"),
    ("angry", "furious"),
    ("smart", "clever"),
    ("brave", "bold"),
    ("sad", "gloomy"),
    ("loud", "noisy"),
    ("quiet", "silent"),
    ("cold", "icy"),
    ("wet", "damp"),
    ("tired", "sleepy"),
    ("easy", "simple"),
    ("buy", "purchase"),
    ("talk", "speak"),
    ("shut", "close"),
    ("choose", "pick"),
    ("help", "assist"),
    ("friend", "ally"),
    ("gift", "present"),
    ("house", "home"),
    ("road", "street"),
    ("empty", "vacant"),
    ("thin", "slim"),
    ("rude", "impolite"),
    ("rough", "coarse"),
    ("wide", "broad"),
    ("strong", "powerful"),
    ("day", "sun"),
    ("night", "moon"),
    ("war", "battle"),
    ("love", "affection"),
];

/// Colour families; every item appears in exactly one family.
const COLOR_FAMILIES: &[&[&str]] = &[
    &["strawberry", "cherry", "tomato", "ruby", "fire truck", "ladybug", "blood", "raspberry"],
    &["carrot", "pumpkin", "tangerine", "apricot", "traffic cone", "marigold"],
    &["banana", "lemon", "sunflower", "canary", "school bus", "corn", "dandelion"],
    &["grass", "lime", "emerald", "frog", "cucumber", "broccoli", "spinach", "pea"],
    &["sky", "sapphire", "blueberry", "ocean", "bluebird", "denim"],
    &["eggplant", "grape", "violet", "lavender", "plum", "amethyst"],
    &["snow", "milk", "cloud", "swan", "cotton", "salt", "chalk", "polar bear"],
    &["coal", "crow", "ink", "tar", "licorice", "charcoal", "panther"],
    &["chocolate", "coffee", "cinnamon", "acorn", "walnut", "mud"],
];

const SEQUENCE_START: u32 = 1;
const SEQUENCE_END: u32 = 99;
const SEQUENCE_STEP: i64 = 1;
/// Offsets for sequential lookalikes; the step itself is never used.
const SEQUENCE_DECOY_OFFSETS: [i64; 5] = [-3, -2, -1, 2, 3];

/// Cross-notation pools cover numbers `1..=99` in words and `1..=30` in
/// Roman numerals.
const WORD_NUMERAL_MAX: u32 = 99;
const ROMAN_NUMERAL_MAX: u32 = 30;
const CROSS_NOTATION_OFFSETS: [i64; 6] = [-10, -2, -1, 1, 2, 10];

/// Denominators whose fractions have terminating decimals.
const FRACTION_DENOMINATORS: [u32; 7] = [2, 4, 5, 8, 10, 20, 25];
const SUM_OPERAND_MAX: u32 = 9;
const SUM_DECOY_OFFSETS: [i64; 4] = [-2, -1, 1, 2];

const CLOCK_MINUTES: [u32; 4] = [0, 15, 30, 45];
const MINUTES_PER_DAY: i64 = 24 * 60;
/// Offsets in minutes for same-time lookalikes: meridiem swap, hour slips,
/// and quarter-hour slips.
const CLOCK_DECOY_OFFSETS: [i64; 7] = [720, 60, -60, 120, -120, 15, -30];

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];
const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Spell out `n` in English words, for `n < 100`.
pub fn number_to_words(n: u32) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => tens.to_string(),
        ones => format!("{tens}-{}", ONES[ones as usize]),
    }
}

/// Roman numeral for `n >= 1`.
pub fn number_to_roman(mut n: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, glyph) in TABLE {
        while n >= value {
            out.push_str(glyph);
            n -= value;
        }
    }
    out
}

/// `HH:MM` on a 24-hour clock.
fn clock_24h(minutes_of_day: i64) -> String {
    let m = minutes_of_day.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// `h:MM AM|PM` on a 12-hour clock.
fn clock_12h(minutes_of_day: i64) -> String {
    let m = minutes_of_day.rem_euclid(MINUTES_PER_DAY);
    let hour = m / 60;
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{:02} {meridiem}", m % 60)
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Reduced proper fractions over [`FRACTION_DENOMINATORS`], as `(num, den)`.
fn fractions() -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    for den in FRACTION_DENOMINATORS {
        for num in 1..den {
            if gcd(num, den) == 1 {
                out.push((num, den));
            }
        }
    }
    out
}

fn fraction_decimal(num: u32, den: u32) -> String {
    format!("{}", f64::from(num) / f64::from(den))
}

fn fraction_percent(num: u32, den: u32) -> String {
    format!("{}%", f64::from(num * 100) / f64::from(den))
}

fn to_u32(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

/// The positive pairs of one relationship type, with a lookup index.
#[derive(Debug, Clone)]
struct Pool {
    pairs: Vec<StimulusPair>,
    members: HashSet<StimulusPair>,
}

impl Pool {
    fn new(pairs: Vec<StimulusPair>) -> Self {
        let members = pairs.iter().cloned().collect();
        Self { pairs, members }
    }
}

/// Immutable catalog of positive pairs per relationship type.
#[derive(Debug, Clone)]
pub struct StimulusCatalog {
    pools: HashMap<RelationshipType, Pool>,
    fractions: Vec<(u32, u32)>,
}

impl Default for StimulusCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StimulusCatalog {
    /// Build the catalog with the built-in pools.
    pub fn builtin() -> Self {
        let fractions = fractions();
        let mut pools = HashMap::new();
        for kind in RelationshipType::ALL {
            let pairs = match kind {
                RelationshipType::PartWhole => literal(PART_WHOLE),
                RelationshipType::Antonym => literal(ANTONYMS),
                RelationshipType::SameColor => same_color_pairs(),
                RelationshipType::SequentialNumber => sequential_pairs(),
                RelationshipType::CrossNotationNumber => cross_notation_pairs(),
                RelationshipType::NumericEquivalence => equivalence_pairs(&fractions),
                RelationshipType::SameTime => same_time_pairs(),
            };
            pools.insert(kind, Pool::new(pairs));
        }
        Self { pools, fractions }
    }

    /// The ordered pool of positive pairs for a relationship type.
    pub fn positive_pairs(&self, kind: RelationshipType) -> &[StimulusPair] {
        self.pools.get(&kind).map_or(&[], |pool| pool.pairs.as_slice())
    }

    pub fn pool_size(&self, kind: RelationshipType) -> usize {
        self.positive_pairs(kind).len()
    }

    /// Whether `pair` is a member of the positive pool for `kind`.
    pub fn is_positive(&self, kind: RelationshipType, pair: &StimulusPair) -> bool {
        self.pools
            .get(&kind)
            .is_some_and(|pool| pool.members.contains(pair))
    }

    /// Generate a near-miss pair that does not satisfy `kind`.
    ///
    /// Each generator is negative by construction; the membership check is
    /// a final guard.
    pub fn generate_lookalike<R: Rng + ?Sized>(&self, kind: RelationshipType, rng: &mut R) -> StimulusPair {
        loop {
            let candidate = match kind {
                RelationshipType::PartWhole => self.part_whole_decoy(rng),
                RelationshipType::Antonym => pick_literal(ANTONYM_DECOYS, rng),
                RelationshipType::SameColor => same_color_decoy(rng),
                RelationshipType::SequentialNumber => sequential_decoy(rng),
                RelationshipType::CrossNotationNumber => cross_notation_decoy(rng),
                RelationshipType::NumericEquivalence => self.equivalence_decoy(rng),
                RelationshipType::SameTime => same_time_decoy(rng),
            };
            if !self.is_positive(kind, &candidate) {
                return candidate;
            }
        }
    }

    /// Either a reversed positive (the whole before the part) or an
    /// associated pair from the decoy list.
    fn part_whole_decoy<R: Rng + ?Sized>(&self, rng: &mut R) -> StimulusPair {
        if rng.random_bool(0.5) {
            let pool = self.positive_pairs(RelationshipType::PartWhole);
            let pair = &pool[rng.random_range(0..pool.len())];
            StimulusPair::new(pair.right.clone(), pair.left.clone())
        } else {
            pick_literal(PART_WHOLE_DECOYS, rng)
        }
    }

    /// A fraction or sum paired with a value it is not equal to, in the same
    /// notation the positive pool uses.
    fn equivalence_decoy<R: Rng + ?Sized>(&self, rng: &mut R) -> StimulusPair {
        match rng.random_range(0..3) {
            0 | 1 => {
                let count = self.fractions.len();
                let i = rng.random_range(0..count);
                let j = (i + rng.random_range(1..count)) % count;
                let (num, den) = self.fractions[i];
                let (other_num, other_den) = self.fractions[j];
                let right = if rng.random_bool(0.5) {
                    fraction_decimal(other_num, other_den)
                } else {
                    fraction_percent(other_num, other_den)
                };
                StimulusPair::new(format!("{num}/{den}"), right)
            }
            _ => {
                let a = rng.random_range(1..=SUM_OPERAND_MAX);
                let b = rng.random_range(a..=SUM_OPERAND_MAX);
                let offset = SUM_DECOY_OFFSETS[rng.random_range(0..SUM_DECOY_OFFSETS.len())];
                let wrong = i64::from(a + b) + offset;
                StimulusPair::new(format!("{a} + {b}"), wrong.to_string())
            }
        }
    }
}

fn literal(pairs: &[(&str, &str)]) -> Vec<StimulusPair> {
    pairs.iter().map(|(l, r)| StimulusPair::new(*l, *r)).collect()
}

fn pick_literal<R: Rng + ?Sized>(pairs: &[(&str, &str)], rng: &mut R) -> StimulusPair {
    let (left, right) = pairs[rng.random_range(0..pairs.len())];
    StimulusPair::new(left, right)
}

fn same_color_pairs() -> Vec<StimulusPair> {
    let mut out = Vec::new();
    for family in COLOR_FAMILIES {
        for (i, left) in family.iter().enumerate() {
            for right in &family[i + 1..] {
                out.push(StimulusPair::new(*left, *right));
            }
        }
    }
    out
}

/// Two items drawn from different colour families.
fn same_color_decoy<R: Rng + ?Sized>(rng: &mut R) -> StimulusPair {
    let count = COLOR_FAMILIES.len();
    let first = rng.random_range(0..count);
    let second = (first + rng.random_range(1..count)) % count;
    let left = COLOR_FAMILIES[first][rng.random_range(0..COLOR_FAMILIES[first].len())];
    let right = COLOR_FAMILIES[second][rng.random_range(0..COLOR_FAMILIES[second].len())];
    StimulusPair::new(left, right)
}

fn sequential_pairs() -> Vec<StimulusPair> {
    (SEQUENCE_START..=SEQUENCE_END)
        .map(|n| StimulusPair::new(n.to_string(), (n + 1).to_string()))
        .collect()
}

fn sequential_decoy<R: Rng + ?Sized>(rng: &mut R) -> StimulusPair {
    let n = i64::from(rng.random_range(SEQUENCE_START..=SEQUENCE_END));
    let offsets: Vec<i64> = SEQUENCE_DECOY_OFFSETS
        .iter()
        .copied()
        .filter(|offset| *offset != SEQUENCE_STEP && n + offset >= 0)
        .collect();
    let offset = offsets[rng.random_range(0..offsets.len())];
    StimulusPair::new(n.to_string(), (n + offset).to_string())
}

fn cross_notation_pairs() -> Vec<StimulusPair> {
    let words = (1..=WORD_NUMERAL_MAX).map(|n| StimulusPair::new(n.to_string(), number_to_words(n)));
    let romans = (1..=ROMAN_NUMERAL_MAX).map(|n| StimulusPair::new(n.to_string(), number_to_roman(n)));
    words.chain(romans).collect()
}

/// A numeral next to another number written in words or Roman numerals.
fn cross_notation_decoy<R: Rng + ?Sized>(rng: &mut R) -> StimulusPair {
    let roman = rng.random_bool(0.3);
    let max = i64::from(if roman { ROMAN_NUMERAL_MAX } else { WORD_NUMERAL_MAX });
    let n = rng.random_range(1..=max);
    let offsets: Vec<i64> = CROSS_NOTATION_OFFSETS
        .iter()
        .copied()
        .filter(|offset| *offset != 0 && (1..=max).contains(&(n + offset)))
        .collect();
    let other = n + offsets[rng.random_range(0..offsets.len())];
    let other = to_u32(other).unwrap_or(1);
    let right = if roman {
        number_to_roman(other)
    } else {
        number_to_words(other)
    };
    StimulusPair::new(n.to_string(), right)
}

fn equivalence_pairs(fractions: &[(u32, u32)]) -> Vec<StimulusPair> {
    let mut out = Vec::new();
    for &(num, den) in fractions {
        out.push(StimulusPair::new(format!("{num}/{den}"), fraction_decimal(num, den)));
        out.push(StimulusPair::new(format!("{num}/{den}"), fraction_percent(num, den)));
    }
    for a in 1..=SUM_OPERAND_MAX {
        for b in a..=SUM_OPERAND_MAX {
            out.push(StimulusPair::new(format!("{a} + {b}"), (a + b).to_string()));
        }
    }
    out
}

fn same_time_pairs() -> Vec<StimulusPair> {
    let mut out = Vec::new();
    for hour in 0..24 {
        for minute in CLOCK_MINUTES {
            let m = i64::from(hour * 60 + minute);
            out.push(StimulusPair::new(clock_24h(m), clock_12h(m)));
        }
    }
    out
}

fn same_time_decoy<R: Rng + ?Sized>(rng: &mut R) -> StimulusPair {
    let hour = rng.random_range(0..24_i64);
    let minute = i64::from(CLOCK_MINUTES[rng.random_range(0..CLOCK_MINUTES.len())]);
    let m = hour * 60 + minute;
    let offset = CLOCK_DECOY_OFFSETS[rng.random_range(0..CLOCK_DECOY_OFFSETS.len())];
    StimulusPair::new(clock_24h(m), clock_12h(m + offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_pool_sizes() {
        let catalog = StimulusCatalog::builtin();
        for kind in RelationshipType::ALL {
            let size = catalog.pool_size(kind);
            assert!(size >= 50, "{kind} pool has only {size} pairs");
        }
        assert_eq!(catalog.pool_size(RelationshipType::SequentialNumber), 99);
        assert_eq!(catalog.pool_size(RelationshipType::SameTime), 96);
    }

    #[test]
    fn test_pools_have_no_duplicates() {
        let catalog = StimulusCatalog::builtin();
        for kind in RelationshipType::ALL {
            let pairs = catalog.positive_pairs(kind);
            let unique: HashSet<_> = pairs.iter().collect();
            assert_eq!(unique.len(), pairs.len(), "{kind} pool has duplicates");
        }
    }

    #[test]
    fn test_colour_items_are_unique_across_families() {
        let mut seen = HashSet::new();
        for family in COLOR_FAMILIES {
            for item in *family {
                assert!(seen.insert(*item), "{item} appears in two families");
            }
        }
    }

    #[test]
    fn test_lookalikes_never_positive() {
        let catalog = StimulusCatalog::builtin();
        let mut rng = SmallRng::seed_from_u64(7);
        for kind in RelationshipType::ALL {
            for _ in 0..500 {
                let pair = catalog.generate_lookalike(kind, &mut rng);
                assert!(!catalog.is_positive(kind, &pair), "{kind} produced positive {pair}");
            }
        }
    }

    #[test]
    fn test_sequential_lookalike_never_uses_step() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..1000 {
            let pair = sequential_decoy(&mut rng);
            let left: i64 = pair.left.parse().unwrap();
            let right: i64 = pair.right.parse().unwrap();
            assert_ne!(right - left, SEQUENCE_STEP);
        }
    }

    #[test]
    fn test_same_colour_lookalike_crosses_families() {
        let mut rng = SmallRng::seed_from_u64(3);
        let family_of = |item: &str| COLOR_FAMILIES.iter().position(|f| f.contains(&item));
        for _ in 0..300 {
            let pair = same_color_decoy(&mut rng);
            assert_ne!(family_of(&pair.left), family_of(&pair.right));
        }
    }

    #[test]
    fn test_number_spelling() {
        assert_eq!(number_to_words(7), "seven");
        assert_eq!(number_to_words(40), "forty");
        assert_eq!(number_to_words(73), "seventy-three");
        assert_eq!(number_to_roman(4), "IV");
        assert_eq!(number_to_roman(19), "XIX");
        assert_eq!(number_to_roman(30), "XXX");
    }

    #[test]
    fn test_clock_formats() {
        assert_eq!(clock_24h(15 * 60 + 30), "15:30");
        assert_eq!(clock_12h(15 * 60 + 30), "3:30 PM");
        assert_eq!(clock_12h(0), "12:00 AM");
        assert_eq!(clock_12h(12 * 60), "12:00 PM");
        assert_eq!(clock_24h(-15), "23:45");
    }

    #[test]
    fn test_fraction_notations() {
        assert_eq!(fraction_decimal(1, 4), "0.25");
        assert_eq!(fraction_percent(1, 8), "12.5%");
        assert_eq!(fraction_percent(3, 20), "15%");
        let catalog = StimulusCatalog::builtin();
        assert!(catalog.is_positive(
            RelationshipType::NumericEquivalence,
            &StimulusPair::new("1/2", "0.5")
        ));
    }
}
