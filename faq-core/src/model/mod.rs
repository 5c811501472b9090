pub mod ids;
pub mod question;
pub mod subject;

pub use ids::IdGenerator;
pub use question::Question;
pub use subject::Subject;
