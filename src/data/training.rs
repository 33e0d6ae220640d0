use crate::data::dataset::DataSet;
use crate::error::{ProvidenceError, Result};
use crate::types::{Point, Project};
use rand::seq::SliceRandom;
use rand::Rng;

/// A project split into the values the network sees (inputs) and the values it must estimate
/// (outputs). Both keep the column order of the source project.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    inputs: Point,
    outputs: Point,
}

impl TrainingRow {
    pub fn new(project: &Project, output_columns: &[usize]) -> Result<Self> {
        if output_columns.is_empty() {
            return Err(ProvidenceError::InvalidArgument(
                "The output column index collection cannot be empty.".to_string(),
            ));
        }

        if let Some(&bad) = output_columns.iter().find(|&&c| c >= project.data.len()) {
            return Err(ProvidenceError::IndexOutOfRange(format!(
                "Output column {} does not exist in a project with {} columns",
                bad,
                project.data.len()
            )));
        }

        let (outputs, inputs): (Vec<(usize, f64)>, Vec<(usize, f64)>) = project
            .data
            .iter()
            .copied()
            .enumerate()
            .partition(|(column, _)| output_columns.contains(column));

        if inputs.is_empty() {
            return Err(ProvidenceError::InvalidArgument(
                "At least one column must remain as an input".to_string(),
            ));
        }

        Ok(Self {
            inputs: inputs.into_iter().map(|(_, v)| v).collect(),
            outputs: outputs.into_iter().map(|(_, v)| v).collect(),
        })
    }

    /// Builds a row directly from already separated inputs and outputs.
    pub fn from_parts(inputs: Point, outputs: Point) -> Result<Self> {
        if outputs.is_empty() {
            return Err(ProvidenceError::InvalidArgument(
                "A training row needs at least one output".to_string(),
            ));
        }
        Ok(Self { inputs, outputs })
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }
}

/// Rows built from a [`DataSet`] with a fixed set of output columns.
#[derive(Debug, Clone)]
pub struct TrainingData {
    rows: Vec<TrainingRow>,
}

impl TrainingData {
    pub fn new(data_set: &DataSet, output_columns: &[usize]) -> Result<Self> {
        let rows = data_set
            .projects()
            .iter()
            .map(|project| TrainingRow::new(project, output_columns))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rows })
    }

    /// Resolves output columns by feature name.
    pub fn with_output_names(data_set: &DataSet, output_names: &[&str]) -> Result<Self> {
        let names = data_set.feature_names();
        let columns = output_names
            .iter()
            .map(|name| {
                names.iter().position(|n| n == name).ok_or_else(|| {
                    ProvidenceError::InvalidArgument(format!("Unknown feature: {}", name))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(data_set, &columns)
    }

    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Monte-Carlo split into a training and a testing sample.
    ///
    /// `ratio` is the share of rows given to the training sample (floored). Rows are shuffled
    /// first, so repeated calls give different splits but no row lands in both samples.
    pub fn split_of_ratio<R: Rng + ?Sized>(
        &mut self,
        ratio: f64,
        rng: &mut R,
    ) -> Result<(Vec<TrainingRow>, Vec<TrainingRow>)> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ProvidenceError::InvalidArgument(format!(
                "The provided ratio must be between 0 and 1: {}",
                ratio
            )));
        }

        self.rows.shuffle(rng);

        let training_size = (self.rows.len() as f64 * ratio).floor() as usize;
        let (training, testing) = self.rows.split_at(training_size);

        Ok((training.to_vec(), testing.to_vec()))
    }
}
