//! Built-in endpoint catalog.

use kiteforge_core::{EndpointSpec, PromptSource};

/// Prefix of every prompt generated from a transaction hash.
pub const ANALYSIS_PROMPT_PREFIX: &str = "Analyze this transaction in detail: ";

/// The three stock chat deployments. The last one starts with an empty pool
/// that is filled from the transaction feed every cycle.
pub fn default_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::new(
            "https://deployment-htmtbvzpc0vboktahrrv1b7f.stag-vxzy.zettablock.com/main",
            "deployment_htmTBVZpC0vbOkTAHRrv1b7F",
            "Kite AI Assistant",
        )
        .with_prompts(ASSISTANT_PROMPTS.iter().copied()),
        EndpointSpec::new(
            "https://deployment-18ozhivejnm9b2a8kwfzrgbj.stag-vxzy.zettablock.com/main",
            "deployment_18oZhIVeJnm9B2a8kWfZrGbJ",
            "Crypto Price Assistant",
        )
        .with_prompts(CRYPTO_PROMPTS.iter().copied()),
        EndpointSpec::new(
            "https://deployment-zs6oe0edbuquit8kk0v10djt.stag-vxzy.zettablock.com/main",
            "deployment_zs6OE0EdBuQuit8KK0V10dJT",
            "Transaction Analyzer",
        )
        .with_prompt_source(PromptSource::RecentTransactions),
    ]
}

/// One analysis prompt per transaction hash.
pub fn analysis_prompts<I, S>(hashes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    hashes
        .into_iter()
        .map(|h| format!("{ANALYSIS_PROMPT_PREFIX}{}", h.as_ref()))
        .collect()
}

const ASSISTANT_PROMPTS: &[&str] = &[
    "Tell me about the latest updates in Kite AI",
    "What are the upcoming features in Kite AI?",
    "How can Kite AI improve my development workflow?",
    "What makes Kite AI unique in the market?",
    "Can you explain Kite AI's machine learning capabilities?",
    "What programming languages does Kite AI support best?",
    "How does Kite AI integrate with different IDEs?",
    "How can I optimize my use of Kite AI?",
    "What is the capital city of Canada?",
    "Who was the first person to walk on the Moon?",
    "What is the largest continent by population?",
    "What is the hardest natural substance on Earth?",
    "Which planet is known as the Red Planet?",
    "How many continents are there?",
    "What is the tallest mountain in the world?",
    "What is the longest river in the world?",
    "Who painted the Mona Lisa?",
    "In which country did the Olympic Games originate?",
    "What is the smallest country in the world?",
    "What is the most spoken language in the world?",
    "Who wrote the play Romeo and Juliet?",
    "What is the largest ocean on Earth?",
    "What is the national flower of Japan?",
    "What is the largest desert in the world?",
    "Who invented the telephone?",
    "What is the currency of Japan?",
    "What is the official language of Brazil?",
    "What is the symbol for the chemical element gold?",
    "Which animal is known as the 'King of the Jungle'?",
    "Which country has the most natural lakes?",
    "What is the smallest planet in our solar system?",
    "What is the largest island in the world?",
    "Who is known as the 'Father of Modern Physics'?",
    "What is the longest man-made structure in the world?",
    "What is the largest land animal on Earth?",
    "Which country is home to the Great Barrier Reef?",
    "What is the capital city of France?",
    "What is the largest city in the world by population?",
    "What is the name of the river that runs through Egypt?",
    "Which famous scientist developed the theory of relativity?",
    "What is the tallest building in the world?",
    "Who is known as the 'Father of the Nation' in India?",
    "Which continent has the most countries?",
    "What is the national dish of Italy?",
    "What is the oldest university in the world?",
    "What is the largest species of shark?",
    "What is the most popular social media platform?",
    "What is the national bird of the United States?",
    "What is the longest running TV show in the world?",
    "What is the main ingredient in guacamole?",
    "Which city is known as the 'City of Lights'?",
    "What is the most commonly used programming language?",
    "Which animal is known for its ability to change color?",
    "What is the most valuable brand in the world?",
    "What is the only country in the world to have a flag that is not rectangular?",
    "Who invented the lightbulb?",
    "What is the fastest land animal?",
    "Which country is famous for tulips and windmills?",
    "What is the capital of Australia?",
    "Which planet is closest to the Sun?",
    "What is the official currency of the United Kingdom?",
    "What is the longest-running video game franchise?",
    "What is the oldest known civilization?",
];

const CRYPTO_PROMPTS: &[&str] = &[
    "What is a blockchain ledger?",
    "How does blockchain ensure security and transparency?",
    "What is the role of cryptography in blockchain?",
    "What are the advantages of using blockchain technology?",
    "What are smart contracts and how do they work?",
    "How does Bitcoin achieve decentralization?",
    "What is Ethereum 2.0 and what improvements does it bring?",
    "What is the main use case for blockchain outside of cryptocurrency?",
    "What is a public key and how is it used in blockchain?",
    "What is a private key and why is it important?",
    "How does a blockchain network reach consensus?",
    "What is a mining pool in the context of blockchain?",
    "What is a sidechain in blockchain?",
    "What is a node in the blockchain network?",
    "How do decentralized applications (DApps) work?",
    "What is the difference between Bitcoin and Ethereum's blockchain?",
    "What is a hash function in blockchain?",
    "What are the benefits of using blockchain for supply chain management?",
    "What is a zero-knowledge proof in blockchain?",
    "What is the difference between Layer 1 and Layer 2 solutions?",
    "How does Proof of Work (PoW) help secure a blockchain?",
    "What is the role of an oracle in blockchain?",
    "What is a wallet address in cryptocurrency?",
    "What is the difference between ERC-20 and ERC-721 tokens?",
    "What is the process of creating a token on Ethereum?",
    "What is a DAO and how does it operate on a blockchain?",
    "What is liquidity farming in DeFi?",
    "What are decentralized finance (DeFi) applications?",
    "What is the significance of the Bitcoin whitepaper?",
    "What is a blockchain fork and why does it occur?",
    "What is a token burn and why is it done?",
    "What is the role of validators in Proof of Stake (PoS)?",
    "What is sharding in the context of blockchain scalability?",
    "What is a decentralized exchange (DEX) and how does it work?",
    "How do airdrops work in cryptocurrency?",
    "What is staking and how does it relate to blockchain?",
    "What is a smart contract audit and why is it necessary?",
    "What is the difference between public and private blockchains?",
    "What is a blockchain bridge?",
    "How does blockchain help in preventing fraud in financial transactions?",
    "What is a Merkle tree and how is it used in blockchain?",
    "What is gas in Ethereum and why is it important?",
    "What is a Proof of Authority (PoA) consensus mechanism?",
    "What is a crypto token swap and how does it work?",
    "What is cross-chain interoperability?",
    "What is the role of a blockchain explorer?",
    "What is the function of a tokenomics model?",
    "What is a cold wallet and how is it used for crypto storage?",
    "What are the risks of using decentralized finance?",
    "What is the role of the Genesis Block in a blockchain?",
    "What is the consensus mechanism used by Polkadot?",
    "What is the Ethereum Virtual Machine (EVM)?",
    "What is a hard fork in a blockchain network?",
    "What is the difference between a hot wallet and a cold wallet?",
    "How does the consensus mechanism in blockchain prevent double-spending?",
    "What is a wrapped token and how is it used?",
    "What is a multi-signature wallet?",
    "What is a privacy coin and how does it ensure anonymity?",
    "What are Layer 2 solutions in blockchain?",
    "What is an ICO (Initial Coin Offering) and how does it work?",
    "What are the challenges in scaling blockchain technology?",
];
