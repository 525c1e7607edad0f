//! The fixed thumbnail prompt.

/// Prompt sent to the image service on every generation.
pub const THUMBNAIL_PROMPT: &str = "Create a hyper-realistic, eye-catching, cinematic thumbnail \
with a 16:9 aspect ratio, suitable for a video essay. The image should feature a mysterious hero \
in a sleek, dark suit with glowing red accents, perched on a gargoyle overlooking a rain-slicked, \
neon-lit city at night. The mood is dramatic and contemplative. The composition must include the \
text \"The Man behind the Mask\" in a bold, cinematic font. Below this, in a secondary font, the \
text \"THE AMAZING SPIDERMAN 2\" should be visible. The text should be integrated naturally into \
the image's composition while being clearly legible.";
