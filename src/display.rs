//! What the front-end shows for each generation state.

use std::fmt;

use crate::controller::GenerationState;
use crate::output::DOWNLOAD_FILENAME;
use crate::ports::image_generator::ImageData;

/// The single thing the preview area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Empty preview before the first generation.
    Placeholder,
    /// Progress indicator while a request is in flight.
    Loading,
    /// Failure notice.
    Error {
        /// Message to show under the heading.
        message: String,
    },
    /// Rendered thumbnail.
    Image {
        /// `data:` URI of the image.
        data_uri: String,
    },
}

/// A thumbnail offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name.
    pub filename: &'static str,
    /// The image payload.
    pub image_data: ImageData,
}

impl Download {
    /// `data:` URI of the downloadable image.
    #[must_use]
    pub fn data_uri(&self) -> String {
        self.image_data.data_uri()
    }
}

impl GenerationState {
    /// The view to render for this state.
    #[must_use]
    pub fn view(&self) -> View {
        match self {
            Self::Idle => View::Placeholder,
            Self::Loading => View::Loading,
            Self::Failed { message } => View::Error { message: message.clone() },
            Self::Succeeded { image_data } => View::Image { data_uri: image_data.data_uri() },
        }
    }

    /// The download on offer; only a successful generation has one.
    #[must_use]
    pub fn download(&self) -> Option<Download> {
        match self {
            Self::Succeeded { image_data } => {
                Some(Download { filename: DOWNLOAD_FILENAME, image_data: image_data.clone() })
            }
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => write!(
                f,
                "Your generated thumbnail will appear here.\nRun thumbgen to generate one."
            ),
            Self::Loading => write!(f, "Generating your masterpiece...\nThis can take a moment."),
            Self::Error { message } => write!(f, "Generation Failed\n{message}"),
            Self::Image { data_uri } => {
                write!(f, "Thumbnail ready ({} byte data URI).", data_uri.len())
            }
        }
    }
}
