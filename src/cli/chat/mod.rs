pub mod conversation_state;
pub mod prompt;
pub mod scenario;
pub mod session;

use std::io::Write;
use std::process::ExitCode;

use eyre::Result;

use crate::cli::chat::session::ChatSession;
use crate::gemini_client::ExpertClient;

const WELCOME_TEXT: &str = "
Nexus AI Expert — live demo

Ask about PE allocations, macro trends, or the Nexus platform.

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
Nexus AI Expert

/clear        Clear the conversation history
/help         Show this help dialogue
/quit         Quit the application
";

const MODEL_LABEL: &str = "Nexus AI";
const USER_LABEL: &str = "You";

/// Terminal rendering surface for one chat session. Reads the transcript and
/// busy flag, forwards user input to the session, and prints each reply as it
/// settles. While a turn is being settled no new input is read, which is the
/// terminal equivalent of disabling the send button.
pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    session: ChatSession<ExpertClient>,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        client: ExpertClient,
    ) -> Self {
        Self {
            output,
            input,
            interactive,
            session: ChatSession::new(client),
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        if self.interactive {
            self.print_welcome()?;
        }

        // The seeded greeting is the first model turn of every session.
        let greeting = &self.session.messages()[0].text;
        writeln!(self.output, "{}: {}", MODEL_LABEL, greeting)?;

        // Non-interactive mode: a single turn, then exit.
        if let Some(input) = self.input.take() {
            self.handle_input(&input).await?;
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let readline = rl.readline(prompt::PROMPT);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        match input.trim() {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            "/clear" => {
                self.session.clear();
                writeln!(self.output, "Conversation cleared.")?;
            }
            _ => {
                self.process_chat_input(input).await?;
            }
        }

        Ok(())
    }

    async fn process_chat_input(&mut self, input: &str) -> Result<()> {
        // Rejected input (blank, or a turn already in flight) is dropped
        // silently, matching the page's disabled send button.
        let Some(turn) = self.session.submit(input) else {
            return Ok(());
        };

        writeln!(self.output, "{}: {}", USER_LABEL, turn.prompt())?;

        let reply = self.session.settle(turn).await;
        writeln!(self.output, "{}: {}", MODEL_LABEL, reply.text)?;

        Ok(())
    }
}

/// Static panel for the scenarios without a live demo, in place of the chat.
pub fn print_placeholder_panel(
    output: &mut dyn Write,
    scenario: scenario::Scenario,
) -> Result<()> {
    writeln!(output, "{}", scenario.title())?;
    writeln!(output, "{}", scenario.tagline())?;
    if let Some(placeholder) = scenario.placeholder() {
        writeln!(output)?;
        writeln!(output, "{}", placeholder)?;
        writeln!(output, "(Contact Sales to see full dashboard demonstration)")?;
    }
    Ok(())
}
