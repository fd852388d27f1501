use {
    clap::{
        crate_description, crate_name, crate_version, value_t_or_exit, App, AppSettings, Arg,
        ArgMatches, SubCommand,
    },
    log::warn,
    serde::Serialize,
    solana_clap_utils::{
        input_parsers::{pubkey_of, value_of},
        input_validators::{is_parsable, is_url, is_valid_pubkey},
    },
    solana_client::nonblocking::rpc_client::RpcClient,
    solana_sdk::{commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey},
    spl_governance_proposal_client::{
        client::{ChainStateClient, ChainStateOfflineClient, ChainStateRpcClient},
        config::ProposalClientConfig,
        outcome::Outcome,
        response::RealmProposals,
        service::GovernanceProposalClient,
    },
    std::{error::Error, process::exit, sync::Arc, time::Duration},
};

struct Config {
    json_rpc_url: String,
    program_id: Pubkey,
    rpc_timeout: Duration,
    verbose: bool,
}

impl Config {
    fn from_matches(matches: &ArgMatches) -> Self {
        let cli_config = if let Some(config_file) = matches.value_of("config_file") {
            solana_cli_config::Config::load(config_file).unwrap_or_default()
        } else {
            solana_cli_config::Config::default()
        };

        Config {
            json_rpc_url: matches
                .value_of("json_rpc_url")
                .unwrap_or(&cli_config.json_rpc_url)
                .to_string(),
            program_id: pubkey_of(matches, "program_id")
                .unwrap_or_else(spl_governance_proposal_client::id),
            rpc_timeout: Duration::from_secs(value_t_or_exit!(matches, "timeout", u64)),
            verbose: matches.is_present("verbose"),
        }
    }

    fn client_config(&self) -> ProposalClientConfig {
        ProposalClientConfig::default()
            .with_program_id(self.program_id)
            .with_rpc_timeout(self.rpc_timeout)
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg({
            let arg = Arg::with_name("config_file")
                .short("C")
                .long("config")
                .value_name("PATH")
                .takes_value(true)
                .global(true)
                .help("Configuration file to use");
            if let Some(ref config_file) = *solana_cli_config::CONFIG_FILE {
                arg.default_value(config_file)
            } else {
                arg
            }
        })
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .takes_value(false)
                .global(true)
                .help("Show additional information"),
        )
        .arg(
            Arg::with_name("json_rpc_url")
                .short("u")
                .long("url")
                .value_name("URL")
                .takes_value(true)
                .global(true)
                .validator(is_url)
                .help("JSON RPC URL for the cluster [default: value from configuration file]"),
        )
        .arg(
            Arg::with_name("program_id")
                .long("program")
                .value_name("PROGRAM_ID")
                .takes_value(true)
                .global(true)
                .validator(is_valid_pubkey)
                .default_value("GovER5Lthms3bLBqWub97yVrMmEogzX7xNjdXpPPCVZw")
                .help("SPL Governance Program ID"),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .takes_value(true)
                .global(true)
                .validator(is_parsable::<u64>)
                .default_value("10")
                .help("Time limit for a single RPC request"),
        )
        .subcommand(
            SubCommand::with_name("proposal")
                .about("Display a proposal")
                .arg(
                    Arg::with_name("proposal")
                        .value_name("PROPOSAL_ADDRESS")
                        .index(1)
                        .required(true)
                        .help("The address of the proposal account"),
                ),
        )
        .subcommand(
            SubCommand::with_name("prepare-vote")
                .about("Prepare an unsigned vote transaction for the voter to sign")
                .arg(
                    Arg::with_name("proposal")
                        .value_name("PROPOSAL_ADDRESS")
                        .index(1)
                        .required(true)
                        .help("The address of the proposal to vote on"),
                )
                .arg(
                    Arg::with_name("voter")
                        .value_name("VOTER_ADDRESS")
                        .index(2)
                        .required(true)
                        .help("The address of the voter, who also pays the fee"),
                )
                .arg(
                    Arg::with_name("vote")
                        .value_name("VOTE")
                        .index(3)
                        .required(true)
                        .help("The vote choice: approve or deny"),
                )
                .arg(
                    Arg::with_name("blockhash")
                        .long("blockhash")
                        .value_name("BLOCKHASH")
                        .takes_value(true)
                        .validator(is_parsable::<Hash>)
                        .help("Recent blockhash to use instead of fetching one from the cluster"),
                ),
        )
        .subcommand(
            SubCommand::with_name("realm-proposals")
                .about("List the proposals of a realm")
                .arg(
                    Arg::with_name("realm")
                        .value_name("REALM_ADDRESS")
                        .index(1)
                        .required(true)
                        .help("The address of the realm"),
                ),
        )
        .subcommand(SubCommand::with_name("health").about("Check the health of the RPC node"))
}

fn proposal_client(config: &Config, blockhash: Option<Hash>) -> GovernanceProposalClient {
    let chain: Arc<dyn ChainStateClient> = match blockhash {
        Some(blockhash) => Arc::new(ChainStateOfflineClient::new(blockhash)),
        None => {
            if config.verbose {
                eprintln!("JSON RPC URL: {}", config.json_rpc_url);
            }
            let rpc_client = Arc::new(RpcClient::new_with_commitment(
                config.json_rpc_url.clone(),
                CommitmentConfig::confirmed(),
            ));
            Arc::new(ChainStateRpcClient::new(rpc_client))
        }
    };

    GovernanceProposalClient::new(chain, config.client_config())
}

/// Value of the outcome, exits the process if it was rejected
fn value_or_exit<T>(outcome: Outcome<T>) -> T {
    match outcome {
        Outcome::Decoded(value) => value,
        Outcome::FallbackUsed { value, reason } => {
            warn!("Showing substitute data: {}", reason);
            value
        }
        Outcome::Rejected(reason) => {
            eprintln!("error: {}", reason);
            exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let app_matches = app().get_matches();

    solana_logger::setup_with_default("solana=info,spl_governance_proposal_client=info");

    match app_matches.subcommand() {
        ("proposal", Some(arg_matches)) => {
            let client = proposal_client(&Config::from_matches(arg_matches), None);

            let proposal = arg_matches.value_of("proposal").unwrap_or_default();
            let summary = value_or_exit(client.fetch_proposal_data(proposal).await);
            print_json(&summary)
        }
        ("prepare-vote", Some(arg_matches)) => {
            let blockhash = value_of::<Hash>(arg_matches, "blockhash");
            let client = proposal_client(&Config::from_matches(arg_matches), blockhash);

            let transaction = value_or_exit(
                client
                    .prepare_vote_transaction(
                        arg_matches.value_of("proposal").unwrap_or_default(),
                        arg_matches.value_of("voter").unwrap_or_default(),
                        arg_matches.value_of("vote").unwrap_or_default(),
                    )
                    .await,
            );
            print_json(&transaction)
        }
        ("realm-proposals", Some(arg_matches)) => {
            let client = proposal_client(&Config::from_matches(arg_matches), None);

            let realm = arg_matches.value_of("realm").unwrap_or_default();
            let proposals = value_or_exit(client.get_realm_proposals(realm).await);
            print_json(&RealmProposals {
                dao_address: realm.to_string(),
                proposals,
            })
        }
        ("health", Some(arg_matches)) => {
            let client = proposal_client(&Config::from_matches(arg_matches), None);
            print_json(&client.health().await)
        }
        _ => unreachable!(),
    }
}
