// Reflections: AI commentary on entries, plus the sentiment heuristic and the
// insights aggregate computed over a user's reflection history.

pub mod generator;
pub mod handlers;
pub mod insights;
pub mod sentiment;
