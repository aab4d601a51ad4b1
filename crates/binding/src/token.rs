//! MyToken contract bindings.
//!
//! An OpenZeppelin v5 style ERC20 with burn, owner-restricted mint and
//! pause/unpause.

use alloy_sol_types::sol;

sol! {
    /// MyToken interface
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    interface MyToken {
        /// Emitted when tokens are transferred
        event Transfer(
            address indexed from,
            address indexed to,
            uint256 value
        );

        /// Emitted when an allowance is set
        event Approval(
            address indexed owner,
            address indexed spender,
            uint256 value
        );

        /// Emitted when the contract is paused
        event Paused(address account);

        /// Emitted when the contract is unpaused
        event Unpaused(address account);

        /// Emitted when ownership moves to a new account
        event OwnershipTransferred(
            address indexed previousOwner,
            address indexed newOwner
        );

        error ERC20InsufficientBalance(address sender, uint256 balance, uint256 needed);
        error ERC20InvalidSender(address sender);
        error ERC20InvalidReceiver(address receiver);
        error EnforcedPause();
        error ExpectedPause();
        error OwnableUnauthorizedAccount(address account);

        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get token decimals
        function decimals() external view returns (uint8);

        /// Get total supply
        function totalSupply() external view returns (uint256);

        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Get the contract owner
        function owner() external view returns (address);

        /// Whether transfers are currently paused
        function paused() external view returns (bool);

        /// Transfer tokens to recipient
        function transfer(address to, uint256 value) external returns (bool);

        /// Burn tokens from the caller's balance
        function burn(uint256 value) external;

        /// Mint new tokens to an account (owner only)
        function mint(address to, uint256 amount) external;

        /// Pause transfers (owner only)
        function pause() external;

        /// Resume transfers (owner only)
        function unpause() external;
    }
}
