//! Dashboard greeting line

use rand::Rng;

/// Greetings shown above the query form
pub const GREETINGS: [&str; 3] = [
    "Hey boss, systems are hot and ready. What’s the play?",
    "F.R.I.D.A.Y. online. Let’s make some sparks fly.",
    "All systems green. What’s on your mind, genius?",
];

/// Greeting at `index`, wrapping around the list
pub fn greeting_at(index: usize) -> &'static str {
    GREETINGS[index % GREETINGS.len()]
}

/// Pick a greeting at random
pub fn random_greeting() -> &'static str {
    greeting_at(rand::thread_rng().gen_range(0..GREETINGS.len()))
}
