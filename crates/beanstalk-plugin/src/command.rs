//! Editor commands.

use std::fmt;
use std::str::FromStr;

/// A command the editor can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginCommand {
    /// Open the active file in the repository browser.
    Browse,
    /// Open blame for the active file at the checked-out revision.
    Blame,
    /// Open a rendered preview of the active file.
    Preview,
    /// Open the repository activity page.
    Activity,
    /// Open the repository's environments page.
    Deployments,
    /// Release a revision to an environment.
    Deploy,
    /// Open the user settings file.
    Settings,
}

impl PluginCommand {
    pub const ALL: [PluginCommand; 7] = [
        PluginCommand::Browse,
        PluginCommand::Blame,
        PluginCommand::Preview,
        PluginCommand::Activity,
        PluginCommand::Deployments,
        PluginCommand::Deploy,
        PluginCommand::Settings,
    ];

    /// Name the editor binds the command to.
    pub fn name(self) -> &'static str {
        match self {
            PluginCommand::Browse => "beanstalk_open",
            PluginCommand::Blame => "beanstalk_blame",
            PluginCommand::Preview => "beanstalk_preview",
            PluginCommand::Activity => "beanstalk_activity",
            PluginCommand::Deployments => "beanstalk_deployments",
            PluginCommand::Deploy => "beanstalk_deploy",
            PluginCommand::Settings => "beanstalk_plugin_settings",
        }
    }

    /// Commands that act on the active file.
    pub fn requires_file(self) -> bool {
        matches!(
            self,
            PluginCommand::Browse | PluginCommand::Blame | PluginCommand::Preview
        )
    }

    /// Commands that need a detected repository.
    pub fn requires_repository(self) -> bool {
        !matches!(self, PluginCommand::Settings)
    }
}

impl fmt::Display for PluginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PluginCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PluginCommand::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| format!("unknown command: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for command in PluginCommand::ALL {
            assert_eq!(command.name().parse::<PluginCommand>(), Ok(command));
        }
        assert!("beanstalk_nope".parse::<PluginCommand>().is_err());
    }

    #[test]
    fn test_file_scoped_commands() {
        assert!(PluginCommand::Blame.requires_file());
        assert!(!PluginCommand::Deploy.requires_file());
        assert!(!PluginCommand::Settings.requires_repository());
    }
}
