use aa_account_utils::{error::UnauthorizedReason, msg::Config};
use cosmwasm_std::Addr;

pub fn require_sequencer(sender: &Addr, config: &Config) -> Result<(), UnauthorizedReason> {
    if *sender != config.sequencer {
        return Err(UnauthorizedReason::NotFromSequencer);
    }
    Ok(())
}

/// `owner` is `None` once ownership has been renounced, leaving only the sequencer.
pub fn require_sequencer_or_owner(
    sender: &Addr,
    config: &Config,
    owner: Option<&Addr>,
) -> Result<(), UnauthorizedReason> {
    if *sender != config.sequencer && owner != Some(sender) {
        return Err(UnauthorizedReason::NotFromSequencerOrOwner);
    }
    Ok(())
}
