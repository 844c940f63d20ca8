mod attached_picture_frame;
mod binary_frame;
mod descriptive_text_frame;
mod event_timing_codes_frame;
mod play_counter_frame;
mod popularimeter;
mod text_information_frame;
mod url_link_frame;

pub use attached_picture_frame::AttachedPictureFrame;
pub use binary_frame::BinaryFrame;
pub use descriptive_text_frame::DescriptiveTextFrame;
pub use event_timing_codes_frame::{Event, EventTimingCodesFrame, EventType, TimestampFormat};
pub use play_counter_frame::PlayCounterFrame;
pub use popularimeter::PopularimeterFrame;
pub use text_information_frame::TextInformationFrame;
pub use url_link_frame::UrlLinkFrame;
