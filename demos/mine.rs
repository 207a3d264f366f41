use log::info;
use pow_ledger::{Ledger, LedgerConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut ledger: Ledger = Ledger::with_config(LedgerConfig::default())?;

    for payload in ["Some data", "More data"] {
        let last = ledger
            .prev_block()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("ledger has no blocks"))?;

        let proof = ledger.proof_of_work(last.proof);
        let prev_hash = ledger.hash_block(&last)?;
        let block = ledger.create_block(proof, prev_hash, Some(payload.to_string()));

        info!("Block {}: {}", block.index, serde_json::to_string(block)?);
    }

    info!("Chain of {} blocks, valid: {}", ledger.len(), ledger.is_chain_valid());
    println!("{}", serde_json::to_string_pretty(ledger.chain())?);

    Ok(())
}
