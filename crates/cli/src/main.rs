//! Command-line client for the clinic portal.
//!
//! Covers both portal roles over the REST API: the doctor dashboard
//! (list/respond) and the student flow (submit/list/pay) including the
//! interactive AI chat. Mirrors the web clients' behavior: the list is
//! re-fetched after every mutating action, and all chat state lives in
//! memory only for the duration of the session.

use anyhow::Context;
use api_shared::{ChatReq, ConfirmPaymentReq, RespondReq, SubmitConsultationReq};
use clap::{Parser, Subcommand};
use clinic_chat::ChatMessage;
use clinic_core::Consultation;
use std::io::{self, BufRead, Write};

mod render;

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Campus medical consultation portal CLI")]
struct Cli {
    /// Portal server base URL (defaults to $CLINIC_SERVER, then localhost)
    #[arg(long)]
    server: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Doctor dashboard
    #[command(subcommand)]
    Doctor(DoctorCommand),
    /// Student portal
    #[command(subcommand)]
    Student(StudentCommand),
}

#[derive(Subcommand)]
enum DoctorCommand {
    /// Show pending requests and completed responses
    List,
    /// Respond to a consultation with a diagnosis, medicine, and fee
    Respond {
        /// Consultation id
        id: i64,
        #[arg(long)]
        diagnosis: String,
        #[arg(long)]
        medicine: String,
        #[arg(long)]
        price: f64,
    },
}

#[derive(Subcommand)]
enum StudentCommand {
    /// Submit a new symptom report
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        symptoms: String,
        /// Start the AI chat once the report is submitted
        #[arg(long)]
        chat: bool,
    },
    /// Show the consultation history
    List,
    /// Confirm payment and provide delivery details
    Pay {
        /// Consultation id
        id: i64,
        #[arg(long)]
        hostel_type: String,
        #[arg(long)]
        hostel_block: String,
        #[arg(long)]
        room_number: String,
    },
    /// Chat with the AI assistant while waiting for the doctor
    Chat {
        #[arg(long)]
        symptoms: String,
    },
}

struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    async fn list(&self) -> anyhow::Result<Vec<Consultation>> {
        let response = self
            .http
            .get(format!("{}/api/get-consultations", self.base_url))
            .send()
            .await
            .context("could not connect to the server")?;
        if !response.status().is_success() {
            anyhow::bail!("server returned {}", response.status());
        }
        response
            .json()
            .await
            .context("unexpected consultation list payload")
    }

    async fn submit(&self, req: &SubmitConsultationReq) -> anyhow::Result<()> {
        self.post(&format!("{}/api/submit-consultation", self.base_url), req)
            .await
    }

    async fn respond(&self, id: i64, req: &RespondReq) -> anyhow::Result<()> {
        self.post(&format!("{}/api/respond/{id}", self.base_url), req)
            .await
    }

    async fn confirm_payment(&self, id: i64, req: &ConfirmPaymentReq) -> anyhow::Result<()> {
        self.post(&format!("{}/api/confirm-payment/{id}", self.base_url), req)
            .await
    }

    /// Sends the accumulated transcript and returns the assistant's reply
    /// text from the relayed completion payload.
    async fn chat(&self, transcript: &[ChatMessage]) -> anyhow::Result<String> {
        let request = ChatReq {
            conversation_history: transcript.to_vec(),
        };
        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .context("could not connect to the server")?;
        if !response.status().is_success() {
            anyhow::bail!("server returned {}", response.status());
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .context("unexpected completion payload")?;
        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_owned)
            .context("completion payload carried no message content")
    }

    async fn post<T: serde::Serialize>(&self, url: &str, body: &T) -> anyhow::Result<()> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .context("could not connect to the server")?;
        if !response.status().is_success() {
            anyhow::bail!("server returned {}", response.status());
        }
        Ok(())
    }
}

fn system_prompt(symptoms: &str) -> String {
    format!(
        "You are a helpful university medical AI assistant. A human doctor has just been \
         notified of the student's issue. Your goal is to provide immediate, general advice. \
         ALWAYS start your first message by saying \"Your consultation has been sent to a \
         doctor.\" Then, provide helpful advice. IMPORTANT: Always end your messages by \
         reminding the user that this is not an official diagnosis and they should wait for \
         the doctor's response for prescribed medication. The student's symptoms are: \
         \"{symptoms}\""
    )
}

/// Interactive chat loop. The transcript (system prompt, symptoms, and every
/// later turn) exists only in this process; closing the session discards it.
async fn run_chat(client: &PortalClient, symptoms: &str) -> anyhow::Result<()> {
    let mut transcript = vec![
        ChatMessage::new("system", system_prompt(symptoms)),
        ChatMessage::new("user", symptoms),
    ];
    println!("you> {symptoms}");
    println!("(empty line or /quit to leave the chat)");

    let stdin = io::stdin();
    loop {
        match client.chat(&transcript).await {
            Ok(reply) => {
                println!("assistant> {reply}");
                transcript.push(ChatMessage::new("assistant", reply));
            }
            Err(e) => {
                eprintln!("Sorry, I am having trouble connecting. Please try again later. ({e})");
            }
        }

        print!("you> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() || line == "/quit" {
            break;
        }
        transcript.push(ChatMessage::new("user", line));
    }

    Ok(())
}

async fn show_dashboard(client: &PortalClient) -> anyhow::Result<()> {
    let consultations = client.list().await?;
    print!("{}", render::dashboard(&consultations));
    Ok(())
}

async fn show_history(client: &PortalClient) -> anyhow::Result<()> {
    let consultations = client.list().await?;
    print!("{}", render::history(&consultations));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let base_url = cli
        .server
        .or_else(|| std::env::var("CLINIC_SERVER").ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    let client = PortalClient::new(base_url);

    match cli.command {
        Commands::Doctor(DoctorCommand::List) => {
            show_dashboard(&client).await?;
        }
        Commands::Doctor(DoctorCommand::Respond {
            id,
            diagnosis,
            medicine,
            price,
        }) => {
            let req = RespondReq {
                diagnosis,
                medicine,
                price,
            };
            match client.respond(id, &req).await {
                Ok(()) => {
                    println!("Response submitted.");
                    show_dashboard(&client).await?;
                }
                Err(e) => eprintln!("Failed to submit response. ({e})"),
            }
        }
        Commands::Student(StudentCommand::Submit {
            name,
            student_id,
            symptoms,
            chat,
        }) => {
            let req = SubmitConsultationReq {
                name_input: name,
                id_input: student_id,
                symptoms_input: symptoms.clone(),
            };
            match client.submit(&req).await {
                Ok(()) => {
                    println!("Your request has been sent successfully!");
                    show_history(&client).await?;
                    if chat {
                        run_chat(&client, &symptoms).await?;
                    }
                }
                Err(e) => eprintln!("An error occurred. ({e})"),
            }
        }
        Commands::Student(StudentCommand::List) => {
            show_history(&client).await?;
        }
        Commands::Student(StudentCommand::Pay {
            id,
            hostel_type,
            hostel_block,
            room_number,
        }) => {
            let req = ConfirmPaymentReq {
                hostel_type,
                hostel_block,
                room_number,
            };
            match client.confirm_payment(id, &req).await {
                Ok(()) => {
                    println!("Payment confirmed.");
                    show_history(&client).await?;
                }
                Err(e) => eprintln!("Payment confirmation failed. Please try again. ({e})"),
            }
        }
        Commands::Student(StudentCommand::Chat { symptoms }) => {
            run_chat(&client, &symptoms).await?;
        }
    }

    Ok(())
}
