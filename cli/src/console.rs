// docprep-cli/src/console.rs

//! Console banner and section separators for the interactive run output.
//! Log lines go through `tracing`; these are the human-facing frame around them.

const HEAVY_RULE: &str =
  "================================================================================";
const LIGHT_RULE: &str =
  "--------------------------------------------------------------------------------";

/// Prints the pipeline banner once at startup.
pub fn print_header() {
  println!("\n{}", HEAVY_RULE);
  println!("{:^80}", "DOCUMENT PREPARATION PIPELINE");
  println!("{:^80}", "Collection, Preprocessing and Service Preparation");
  println!("{}\n", HEAVY_RULE);
}

/// Prints a section separator ahead of a stage's output.
pub fn print_separator(title: &str) {
  println!("\n{}", LIGHT_RULE);
  println!("  {}", title);
  println!("{}\n", LIGHT_RULE);
}
