mod merge;
mod resample;
mod simplify;
mod split;

pub use merge::{MergeRoutes, SubtractRoutes};
pub use resample::Resample;
pub use simplify::SimplifyRoute;
pub use split::{RouteSplit, SplitAtPoint};
