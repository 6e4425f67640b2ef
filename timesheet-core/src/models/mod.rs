mod batch;
mod entry;
mod ids;
mod invoice;
mod labels;
mod lookup;
mod upload;

pub use batch::*;
pub use entry::*;
pub use ids::*;
pub use invoice::*;
pub use labels::*;
pub use lookup::*;
pub use upload::*;
