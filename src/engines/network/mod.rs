pub mod geometry;
pub mod initialiser;
pub mod perceptron;
pub mod step;

pub use geometry::LayerGeometry;
pub use initialiser::ValueInitialiser;
pub use perceptron::FeedForwardPerceptron;
pub use step::StepFunction;
