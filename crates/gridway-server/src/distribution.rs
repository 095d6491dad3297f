//! Message builders for the three withdrawal endpoints

use crate::error::BuildError;
use crate::policy::Endpoint;
use crate::querier::DistributionQuerier;
use crate::resolve::{
    resolve_account_address, resolve_validator_address, AddressDecodeError, PathVars,
};
use async_trait::async_trait;
use gridway_types::{
    AccAddress, MsgWithdrawDelegatorReward, MsgWithdrawValidatorCommission, SdkMsg, ValAddress,
};
use tracing::debug;

/// The endpoint-specific step of the withdrawal pipeline: which path
/// variables it needs and how they become messages
#[async_trait]
pub trait MessageBuilder: Send + Sync {
    /// Addresses decoded from the path
    type Addrs: Send;

    fn endpoint(&self) -> Endpoint;

    fn resolve(&self, vars: &PathVars) -> Result<Self::Addrs, AddressDecodeError>;

    async fn build(
        &self,
        addrs: Self::Addrs,
        querier: &dyn DistributionQuerier,
    ) -> Result<Vec<Box<dyn SdkMsg>>, BuildError>;
}

/// `POST /distribution/delegators/{delegatorAddr}/rewards`
#[derive(Debug, Clone, Copy, Default)]
pub struct WithdrawDelegatorRewards;

/// `POST /distribution/delegators/{delegatorAddr}/rewards/{validatorAddr}`
#[derive(Debug, Clone, Copy, Default)]
pub struct WithdrawDelegationReward;

/// `POST /distribution/validators/{validatorAddr}/rewards`
#[derive(Debug, Clone, Copy, Default)]
pub struct WithdrawValidatorRewards;

#[async_trait]
impl MessageBuilder for WithdrawDelegatorRewards {
    type Addrs = AccAddress;

    fn endpoint(&self) -> Endpoint {
        Endpoint::DelegatorRewards
    }

    fn resolve(&self, vars: &PathVars) -> Result<AccAddress, AddressDecodeError> {
        resolve_account_address(vars)
    }

    async fn build(
        &self,
        delegator: AccAddress,
        querier: &dyn DistributionQuerier,
    ) -> Result<Vec<Box<dyn SdkMsg>>, BuildError> {
        withdraw_all_delegator_rewards(querier, delegator).await
    }
}

#[async_trait]
impl MessageBuilder for WithdrawDelegationReward {
    type Addrs = (AccAddress, ValAddress);

    fn endpoint(&self) -> Endpoint {
        Endpoint::DelegationReward
    }

    fn resolve(&self, vars: &PathVars) -> Result<(AccAddress, ValAddress), AddressDecodeError> {
        let delegator = resolve_account_address(vars)?;
        let validator = resolve_validator_address(vars)?;
        Ok((delegator, validator))
    }

    async fn build(
        &self,
        (delegator, validator): (AccAddress, ValAddress),
        _querier: &dyn DistributionQuerier,
    ) -> Result<Vec<Box<dyn SdkMsg>>, BuildError> {
        let msg = MsgWithdrawDelegatorReward::new(delegator, validator);
        msg.validate_basic()?;
        Ok(vec![Box::new(msg)])
    }
}

#[async_trait]
impl MessageBuilder for WithdrawValidatorRewards {
    type Addrs = ValAddress;

    fn endpoint(&self) -> Endpoint {
        Endpoint::ValidatorRewards
    }

    fn resolve(&self, vars: &PathVars) -> Result<ValAddress, AddressDecodeError> {
        resolve_validator_address(vars)
    }

    async fn build(
        &self,
        validator: ValAddress,
        _querier: &dyn DistributionQuerier,
    ) -> Result<Vec<Box<dyn SdkMsg>>, BuildError> {
        withdraw_validator_rewards_and_commission(validator)
    }
}

/// One reward withdrawal per validator the delegator is bonded to.
///
/// The validator list comes from chain state, so the messages are not
/// validated again.
pub async fn withdraw_all_delegator_rewards(
    querier: &dyn DistributionQuerier,
    delegator: AccAddress,
) -> Result<Vec<Box<dyn SdkMsg>>, BuildError> {
    let validators = querier.delegator_validators(&delegator).await?;
    debug!(
        "delegator {} has rewards with {} validator(s)",
        delegator,
        validators.len()
    );

    Ok(validators
        .into_iter()
        .map(|validator| {
            Box::new(MsgWithdrawDelegatorReward::new(delegator, validator)) as Box<dyn SdkMsg>
        })
        .collect())
}

/// Commission withdrawal followed by the operator's own delegation reward
pub fn withdraw_validator_rewards_and_commission(
    validator: ValAddress,
) -> Result<Vec<Box<dyn SdkMsg>>, BuildError> {
    let commission = MsgWithdrawValidatorCommission::new(validator);
    commission.validate_basic()?;

    let rewards = MsgWithdrawDelegatorReward::new(AccAddress::from(validator), validator);
    rewards.validate_basic()?;

    Ok(vec![Box::new(commission), Box::new(rewards)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::querier::QueryError;
    use crate::resolve::{DELEGATOR_ADDR_VAR, VALIDATOR_ADDR_VAR};
    use crate::policy::BuildErrorKind;

    struct StaticQuerier(Vec<ValAddress>);

    #[async_trait]
    impl DistributionQuerier for StaticQuerier {
        async fn delegator_validators(
            &self,
            _delegator: &AccAddress,
        ) -> Result<Vec<ValAddress>, QueryError> {
            Ok(self.0.clone())
        }
    }

    struct FailingQuerier;

    #[async_trait]
    impl DistributionQuerier for FailingQuerier {
        async fn delegator_validators(
            &self,
            _delegator: &AccAddress,
        ) -> Result<Vec<ValAddress>, QueryError> {
            Err(QueryError::Transport("connection refused".to_string()))
        }
    }

    fn delegator() -> AccAddress {
        AccAddress::new([7u8; 20])
    }

    #[tokio::test]
    async fn test_one_message_per_validator() {
        let validators = vec![ValAddress::new([1u8; 20]), ValAddress::new([2u8; 20])];
        let querier = StaticQuerier(validators.clone());

        let msgs = WithdrawDelegatorRewards
            .build(delegator(), &querier)
            .await
            .unwrap();
        assert_eq!(msgs.len(), 2);

        for (msg, validator) in msgs.iter().zip(&validators) {
            let msg = msg
                .as_any()
                .downcast_ref::<MsgWithdrawDelegatorReward>()
                .unwrap();
            assert_eq!(msg.delegator_address, Some(delegator()));
            assert_eq!(msg.validator_address.as_ref(), Some(validator));
        }
    }

    #[tokio::test]
    async fn test_no_delegations_builds_nothing() {
        let msgs = WithdrawDelegatorRewards
            .build(delegator(), &StaticQuerier(vec![]))
            .await
            .unwrap();
        assert!(msgs.is_empty());
    }

    #[tokio::test]
    async fn test_query_failure_is_query_kind() {
        let err = WithdrawDelegatorRewards
            .build(delegator(), &FailingQuerier)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::Query);
    }

    #[tokio::test]
    async fn test_single_delegation_accepts_all_zero_validator() {
        let zero = ValAddress::new([0u8; 20]);
        let msgs = WithdrawDelegationReward
            .build((AccAddress::new([1u8; 20]), zero), &FailingQuerier)
            .await
            .unwrap();
        assert_eq!(msgs.len(), 1);

        let msgs = withdraw_validator_rewards_and_commission(zero).unwrap();
        assert_eq!(msgs.len(), 2);
    }

    #[test]
    fn test_validator_batch_order() {
        let validator = ValAddress::new([9u8; 20]);
        let msgs = withdraw_validator_rewards_and_commission(validator).unwrap();

        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].msg_type(), "withdraw_validator_commission");
        assert_eq!(msgs[1].msg_type(), "withdraw_delegator_reward");
        assert_eq!(msgs[1].get_signers(), vec![AccAddress::from(validator)]);
    }

    #[test]
    fn test_resolve_uses_endpoint_variables() {
        let validator = ValAddress::new([9u8; 20]);
        let vars: PathVars = [
            (DELEGATOR_ADDR_VAR.to_string(), delegator().to_bech32()),
            (VALIDATOR_ADDR_VAR.to_string(), validator.to_bech32()),
        ]
        .into_iter()
        .collect();

        assert_eq!(WithdrawDelegatorRewards.resolve(&vars).unwrap(), delegator());
        assert_eq!(
            WithdrawDelegationReward.resolve(&vars).unwrap(),
            (delegator(), validator)
        );
        assert_eq!(WithdrawValidatorRewards.resolve(&vars).unwrap(), validator);

        let err = WithdrawValidatorRewards.resolve(&PathVars::new()).unwrap_err();
        assert_eq!(err.var, VALIDATOR_ADDR_VAR);
    }
}
