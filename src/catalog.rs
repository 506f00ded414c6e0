/// A phrase the player has to type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence {
    pub text: &'static str,
}

impl Sentence {
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// Length in chars, which is what the comparison walks.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub const SENTENCE_COUNT: usize = 100;

/// The fixed sentence catalog. "Vine dance" appears twice.
pub static SENTENCES: [Sentence; SENTENCE_COUNT] = [
    Sentence::new("Banana yum"),
    Sentence::new("Tree swing"),
    Sentence::new("Ooh ooh ah"),
    Sentence::new("Typing monkey"),
    Sentence::new("Coconuts fall"),
    Sentence::new("Jungle fun"),
    Sentence::new("Monkey business"),
    Sentence::new("Vine swinging"),
    Sentence::new("Chatter chatter"),
    Sentence::new("Nut cracking"),
    Sentence::new("Jungle beat"),
    Sentence::new("Typewriter clack"),
    Sentence::new("Fuzzy tail"),
    Sentence::new("Branch balancing"),
    Sentence::new("Leaf munching"),
    Sentence::new("Coconut bash"),
    Sentence::new("Wild adventure"),
    Sentence::new("Tarzan yell"),
    Sentence::new("Hanging around"),
    Sentence::new("Paw prints"),
    Sentence::new("Jungle boogie"),
    Sentence::new("Barrel roll"),
    Sentence::new("Forest frolic"),
    Sentence::new("Vine dance"),
    Sentence::new("Coconut treat"),
    Sentence::new("Banana peel"),
    Sentence::new("Chimpanzee dance"),
    Sentence::new("Curious George"),
    Sentence::new("Jungle gym"),
    Sentence::new("Baboon butt"),
    Sentence::new("Primate play"),
    Sentence::new("Coconut juice"),
    Sentence::new("Palm tree sway"),
    Sentence::new("Swing high"),
    Sentence::new("Monkey see"),
    Sentence::new("Monkey do"),
    Sentence::new("Jungle fever"),
    Sentence::new("Coconut snack"),
    Sentence::new("Swinging tails"),
    Sentence::new("Tarzans jungle"),
    Sentence::new("Leafy greens"),
    Sentence::new("Primate party"),
    Sentence::new("Banana split"),
    Sentence::new("Treehouse fun"),
    Sentence::new("Hooting monkeys"),
    Sentence::new("Jungle rhythm"),
    Sentence::new("Banana bunch"),
    Sentence::new("Monkey magic"),
    Sentence::new("Coconut milk"),
    Sentence::new("Furry friends"),
    Sentence::new("Tropical delight"),
    Sentence::new("Monkey madness"),
    Sentence::new("Jungle sounds"),
    Sentence::new("Leaf canopy"),
    Sentence::new("Coconut craze"),
    Sentence::new("Climbing high"),
    Sentence::new("Primate power"),
    Sentence::new("Banana bread"),
    Sentence::new("Vine surfing"),
    Sentence::new("Jungle trek"),
    Sentence::new("Playful primates"),
    Sentence::new("Coconut shell"),
    Sentence::new("Swing low"),
    Sentence::new("Branch break"),
    Sentence::new("Tarzans call"),
    Sentence::new("Monkey swing"),
    Sentence::new("Banana peel slip"),
    Sentence::new("Forest canopy"),
    Sentence::new("Coconut cluster"),
    Sentence::new("Monkey mischief"),
    Sentence::new("Jungle king"),
    Sentence::new("Vine twirl"),
    Sentence::new("Hanging loose"),
    Sentence::new("Leafy paradise"),
    Sentence::new("Coconut crunch"),
    Sentence::new("Swing set"),
    Sentence::new("Jungle thrills"),
    Sentence::new("Banana hammock"),
    Sentence::new("Tarzans roar"),
    Sentence::new("Monkeying around"),
    Sentence::new("Tropical paradise"),
    Sentence::new("Vine swing"),
    Sentence::new("Coconut paradise"),
    Sentence::new("Primate paradise"),
    Sentence::new("Jungle jive"),
    Sentence::new("Banana boat"),
    Sentence::new("Monkey jump"),
    Sentence::new("Jungle joy"),
    Sentence::new("Vine hop"),
    Sentence::new("Coconut conundrum"),
    Sentence::new("Swing time"),
    Sentence::new("Banana frenzy"),
    Sentence::new("Tarzanss leap"),
    Sentence::new("Monkey chatter"),
    Sentence::new("Jungle escapade"),
    Sentence::new("Coconut chaos"),
    Sentence::new("Primate antics"),
    Sentence::new("Vine dance"),
    Sentence::new("Banana bash"),
    Sentence::new("Jungle quest"),
];

/// Look up a sentence, clamping out-of-range indices to the last entry.
pub fn sentence(index: usize) -> Sentence {
    SENTENCES[index.min(SENTENCE_COUNT - 1)]
}
