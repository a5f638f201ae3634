use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Casual,
    Formal,
}

impl Tone {
    pub fn prompt(self, topic: &str) -> String {
        match self {
            Tone::Casual => format!(
                "Act as a fun, creative, and casual social media commentator. \
                 Explain the following topic in a short, easy-to-digest summary \
                 of no more than three sentences, using simple language and an \
                 energetic tone:\n\"{}\"",
                topic
            ),
            Tone::Formal => format!(
                "Act as a formal, analytical academic researcher. \
                 Provide a detailed, objective explanation of the following topic \
                 using professional terminology. Structure the answer in exactly \
                 three parts: 1. Definition, 2. Key Concepts, 3. Implications.\n\"{}\"",
                topic
            ),
        }
    }

    pub fn max_tokens(self) -> u32 {
        match self {
            Tone::Casual => 250,
            Tone::Formal => 350,
        }
    }

    pub fn temperature(self) -> f32 {
        match self {
            Tone::Casual => 0.8,
            Tone::Formal => 0.3,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Casual => write!(f, "casual"),
            Tone::Formal => write!(f, "formal"),
        }
    }
}
