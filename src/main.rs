use hd_wallet_core::{DerivationPath, HDWallet, Result, TronAddress};
use std::env;

fn print_usage() {
    println!("HD Wallet Core - BIP32/BIP44 key derivation and TRON addresses");
    println!("\nUsage:");
    println!("  hd-wallet-core <command> [options]");
    println!("\nCommands:");
    println!("  derive <seed-hex> <path>          Derive private key at BIP32 path");
    println!("  address <seed-hex> [path]         Derive TRON address (default m/44'/195'/0'/0/0)");
    println!("  xprv <seed-hex> <coin> <account>  Extended private key for an account");
    println!("  xpub <seed-hex> <coin> <account>  Extended public key for an account");
    println!("  help                              Show this help message");
    println!("\nExamples:");
    println!("  hd-wallet-core derive <64-byte-seed-hex> \"m/44'/195'/0'/0/0\"");
    println!("  hd-wallet-core xpub <64-byte-seed-hex> 195 0");
}

fn wallet_from_hex(seed_hex: &str) -> Result<HDWallet> {
    let seed = hex::decode(seed_hex).map_err(|_| {
        hd_wallet_core::WalletError::CryptoFailure("seed must be hex-encoded")
    })?;
    HDWallet::from_seed(&seed)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "derive" => {
            if args.len() < 4 {
                println!("Usage: hd-wallet-core derive <seed-hex> <path>");
                return Ok(());
            }
            let result = wallet_from_hex(&args[2])
                .and_then(|wallet| Ok((wallet, args[3].parse::<DerivationPath>()?)))
                .and_then(|(wallet, path)| wallet.key_at(&path));
            match result {
                Ok(key) => println!("private key: {}", hex::encode(key.to_bytes())),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        "address" => {
            if args.len() < 3 {
                println!("Usage: hd-wallet-core address <seed-hex> [path]");
                return Ok(());
            }
            let path_text = args.get(3).map(|s| s.as_str()).unwrap_or("m/44'/195'/0'/0/0");
            let result = wallet_from_hex(&args[2])
                .and_then(|wallet| Ok((wallet, path_text.parse::<DerivationPath>()?)))
                .and_then(|(wallet, path)| wallet.key_at(&path));
            match result {
                Ok(key) => {
                    let address = TronAddress::derive_from_public_key(&key.public_key());
                    println!("address: {}", address);
                    println!("hex:     {}", address.hex());
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        "xprv" | "xpub" => {
            if args.len() < 5 {
                println!("Usage: hd-wallet-core {} <seed-hex> <coin> <account>", args[1]);
                return Ok(());
            }
            let coin: u32 = args[3].parse().unwrap_or(0);
            let account: u32 = args[4].parse().unwrap_or(0);
            let result = wallet_from_hex(&args[2]).and_then(|wallet| {
                if args[1] == "xprv" {
                    wallet.extended_private_account(coin, account)
                } else {
                    wallet.extended_public_account(coin, account)
                }
            });
            match result {
                Ok(extended) => println!("{}: {}", args[1], extended),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            println!("Unknown command: {}", args[1]);
            print_usage();
            Ok(())
        }
    }
}
