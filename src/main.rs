//! tts-segment: split chapters into budget-sized TTS segments.

use anyhow::Result;

fn main() -> Result<()> {
    tts_segmenter::cli::run()
}
