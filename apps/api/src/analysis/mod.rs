// Resume-vs-job-posting analysis and course recommendations.

pub mod handlers;
pub mod pipeline;
