//! List command implementation

use anyhow::Result;
use clap::Subcommand;
use textkit_core::format::SpecKind;
use textkit_core::global;

use super::RunContext;
use crate::output::Record;

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List registered type names and aliases
    Types,

    /// List supported placeholder format types
    Specifiers,
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self, ctx: &RunContext) -> Result<()> {
        let mut formatter = ctx.formatter(false);
        for record in self.records() {
            formatter.write_record(&record)?;
        }
        formatter.finish()
    }

    fn records(&self) -> Vec<Record> {
        match self {
            ListCommands::Types => global()
                .name_targets()
                .into_iter()
                .map(|(name, target)| Record::TypeName {
                    name: name.to_string(),
                    target: target.to_string(),
                })
                .collect(),
            ListCommands::Specifiers => SpecKind::catalog()
                .iter()
                .map(|(kind, description)| Record::Specifier {
                    specifier: format!("{{:{}}}", kind.as_str()),
                    description: description.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_include_aliases() {
        let records = ListCommands::Types.records();
        assert!(records.contains(&Record::TypeName {
            name: "int".to_string(),
            target: "i32".to_string(),
        }));
        assert!(records.contains(&Record::TypeName {
            name: "uuid".to_string(),
            target: "uuid".to_string(),
        }));
    }

    #[test]
    fn test_specifiers() {
        let records = ListCommands::Specifiers.records();
        assert_eq!(records.len(), SpecKind::catalog().len());
        assert!(matches!(
            &records[0],
            Record::Specifier { specifier, .. } if specifier == "{:}"
        ));
        assert!(records.iter().any(|r| matches!(
            r,
            Record::Specifier { specifier, .. } if specifier == "{:x}"
        )));
    }
}
