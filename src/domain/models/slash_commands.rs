#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_upload()
            || cmd.is_remove()
            || cmd.is_analysis()
            || cmd.is_stop()
            || cmd.is_clear()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Arguments joined back together, so paths containing spaces survive.
    pub fn arg_text(&self) -> String {
        return self
            .args
            .iter()
            .filter(|e| return !e.is_empty())
            .cloned()
            .collect::<Vec<String>>()
            .join(" ");
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_upload(&self) -> bool {
        return ["/u", "/upload"].contains(&self.command.as_str());
    }

    pub fn is_remove(&self) -> bool {
        return ["/rm", "/remove"].contains(&self.command.as_str());
    }

    pub fn is_analysis(&self) -> bool {
        return ["/an", "/analysis"].contains(&self.command.as_str());
    }

    pub fn is_stop(&self) -> bool {
        return ["/s", "/stop"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return self.command == "/clear";
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
