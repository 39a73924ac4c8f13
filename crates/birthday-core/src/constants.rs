use crate::clock::Millis;

// Shared timing and palette constants used by both web and native frontends.

// Tune
pub const SPARKLE_PERIOD_MS: Millis = 3_000;
pub const AUDIO_LEAD_SEC: f64 = 0.01; // schedule slightly ahead of the audio clock

// Cake explosion cues, measured from activation
pub const CAKE_VIBRATE_AT_MS: Millis = 2_000;
pub const CAKE_EXPLODE_AT_MS: Millis = 4_000;
pub const CAKE_COMPLETE_AT_MS: Millis = 7_000;

// Cut-the-cake widget
pub const CUT_ANIMATION_MS: Millis = 500;

// Wishes
pub const WISH_CAPACITY: usize = 10;
pub const WISH_LATENCY_MS: Millis = 500;
pub const WISH_MAX_CHARS: usize = 280;

// Confetti
pub const CONFETTI_DURATION_MS: Millis = 3_000;
pub const CONFETTI_INTERVAL_MS: Millis = 250;
pub const CONFETTI_BASE_PARTICLES: f32 = 50.0;
pub const CONFETTI_SHOT_LIFETIME_MS: Millis = 1_000; // about 60 animation ticks
pub const CONFETTI_COLORS: [&str; 5] = ["#9333ea", "#3b82f6", "#fbbf24", "#06b6d4", "#ec4899"];

// Background particles
pub const PARTICLE_COLORS: [&str; 5] = [
    "rgba(147, 51, 234, 0.6)",  // purple
    "rgba(59, 130, 246, 0.6)",  // blue
    "rgba(251, 191, 36, 0.6)",  // gold
    "rgba(6, 182, 212, 0.6)",   // turquoise
    "rgba(255, 255, 255, 0.4)", // white
];

// Message bubbles
pub const BUBBLE_QUOTES: [&str; 8] = [
    "Make a wish! 🌟",
    "Another year of awesome! 🎉",
    "Celebrate big! 🎊",
    "You're amazing! ✨",
    "Best birthday ever! 🎂",
    "Dream big! 🌈",
    "Joy & happiness! 💖",
    "Special day! 🎈",
];
pub const BUBBLE_GLOWS: [&str; 4] = ["glow-purple", "glow-blue", "glow-gold", "glow-turquoise"];
