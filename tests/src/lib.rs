//! Host-based tests for the remote text-entry pipeline


#[cfg(test)]
mod pipeline_tests;

#[cfg(test)]
mod dispatch_tests;

#[cfg(test)]
mod robustness_tests;
