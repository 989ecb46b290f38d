pub mod state_codec;
pub mod url_state;
pub mod playback;
