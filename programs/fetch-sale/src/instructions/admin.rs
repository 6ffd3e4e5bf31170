use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    error::SaleError,
    events::{BeneficiaryUpdated, SalePauseChanged, UnusedWithdrawn},
    state::Sale,
};

pub fn set_paused_handler(ctx: Context<SaleAdmin>, paused: bool) -> Result<()> {
    let sale = &mut ctx.accounts.sale;
    sale.paused = paused;
    emit!(SalePauseChanged { sale: sale.key(), paused });
    msg!("Sale paused={}", paused);
    Ok(())
}

pub fn update_beneficiary_handler(ctx: Context<SaleAdmin>, beneficiary: Pubkey) -> Result<()> {
    let sale = &mut ctx.accounts.sale;
    sale.beneficiary = beneficiary;
    emit!(BeneficiaryUpdated { sale: sale.key(), beneficiary });
    msg!("Beneficiary updated: {}", beneficiary);
    Ok(())
}

/// Return unsold inventory to the owner.
pub fn withdraw_unused_handler(ctx: Context<WithdrawUnused>, amount: u64) -> Result<()> {
    require!(amount > 0, SaleError::ZeroAmount);
    require!(
        ctx.accounts.inventory.amount >= amount,
        SaleError::InsufficientInventory
    );

    let sale_key = ctx.accounts.sale.key();
    let seeds: &[&[u8]] = &[
        SALE_AUTHORITY_SEED,
        sale_key.as_ref(),
        &[ctx.accounts.sale.authority_bump],
    ];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.inventory.to_account_info(),
                to: ctx.accounts.owner_token_account.to_account_info(),
                authority: ctx.accounts.sale_authority.to_account_info(),
            },
            &[seeds],
        ),
        amount,
    )?;

    emit!(UnusedWithdrawn { sale: sale_key, amount });
    msg!("Unused inventory withdrawn: {}", amount);
    Ok(())
}

#[derive(Accounts)]
pub struct SaleAdmin<'info> {
    pub owner: Signer<'info>,

    #[account(mut, has_one = owner @ SaleError::Unauthorized)]
    pub sale: Box<Account<'info, Sale>>,
}

#[derive(Accounts)]
pub struct WithdrawUnused<'info> {
    pub owner: Signer<'info>,

    #[account(has_one = owner @ SaleError::Unauthorized)]
    pub sale: Box<Account<'info, Sale>>,

    /// CHECK: PDA authority over the inventory
    #[account(
        seeds = [SALE_AUTHORITY_SEED, sale.key().as_ref()],
        bump = sale.authority_bump,
    )]
    pub sale_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = sale.inventory @ SaleError::MintMismatch,
    )]
    pub inventory: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = owner_token_account.mint == sale.token_mint @ SaleError::MintMismatch,
        constraint = owner_token_account.owner == owner.key(),
    )]
    pub owner_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
