/// Status lines shown while an analysis is in flight, cycled in order.
pub const LOADING_MESSAGES: &[&str] = &[
    "🔍 Scanning resume structure...",
    "🤖 Simulating ATS algorithms...",
    "👔 Analyzing from recruiter perspective...",
    "📊 Calculating skill matches...",
    "🎯 Identifying keyword gaps...",
    "💡 Generating career insights...",
    "🚀 Preparing your roadmap...",
    "✨ Polishing recommendations...",
];

pub fn message_at(index: usize) -> &'static str {
    LOADING_MESSAGES[index % LOADING_MESSAGES.len()]
}

pub fn next_index(index: usize) -> usize {
    (index + 1) % LOADING_MESSAGES.len()
}
