/// Page markup ids and presentation tuning for the web front-end.
///
/// Kept free of `web_sys` so host-side tests can include it.
// Element ids (see index.html)
pub const SURPRISE_BUTTON_ID: &str = "surprise-btn";
pub const MUSIC_TOGGLE_ID: &str = "music-toggle";
pub const CAKE_ID: &str = "cake";
pub const CAKE_STAGE_ID: &str = "cake-stage";
pub const CUT_BUTTON_ID: &str = "cut-btn";
pub const SLICE_BADGE_ID: &str = "slice-badge";
pub const SLICE_CAPTION_ID: &str = "slice-caption";
pub const WISH_CARD_ID: &str = "wish-card";
pub const WISH_CARD_CLOSE_ID: &str = "wish-card-close";
pub const WISH_CARD_BACKDROP_ID: &str = "wish-card-backdrop";
pub const WISH_FORM_ID: &str = "wish-form";
pub const WISH_INPUT_ID: &str = "wish-input";
pub const WISH_SUBMIT_ID: &str = "wish-submit";
pub const WISH_SPINNER_ID: &str = "wish-spinner";
pub const WISH_LIST_ID: &str = "wish-list";
pub const PARTICLE_LAYER_ID: &str = "particle-layer";
pub const BUBBLE_LAYER_ID: &str = "bubble-layer";
pub const CONFETTI_LAYER_ID: &str = "confetti-layer";
pub const TIME_WIDGET_ID: &str = "time-widget-value";
pub const CONFIG_SCRIPT_ID: &str = "greeting-config";

pub const HIDDEN_CLASS: &str = "hidden";
pub const CUTTING_CLASS: &str = "cake-slice";

pub const EMPTY_WISHES_TEXT: &str = "Be the first to send a wish!";

// Time widget refresh period
pub const CLOCK_REFRESH_MS: u64 = 1_000;

// Explosion overlay piece counts
pub const EXPLOSION_SPARKS: usize = 20;
pub const EXPLOSION_CONFETTI: usize = 30;

/// Flying slices: launch offset and spin (px, px, deg), then where the slice
/// sticks once the sequence completes (px, px) relative to the page centre.
pub const SLICE_PATHS: [([f32; 3], [f32; 2]); 6] = [
    ([-300.0, -200.0, -45.0], [-150.0, -100.0]),
    ([300.0, -200.0, 45.0], [150.0, -100.0]),
    ([-400.0, 0.0, -90.0], [-200.0, 0.0]),
    ([400.0, 0.0, 90.0], [200.0, 0.0]),
    ([-300.0, 200.0, -135.0], [-150.0, 100.0]),
    ([300.0, 200.0, 135.0], [150.0, 100.0]),
];

// Spark and confetti pieces fly out on a ring of this radius (px)
pub const BURST_RADIUS_PX: f32 = 260.0;
