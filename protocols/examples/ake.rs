use curve::Bls24;
use protocols::{ClientHandshake, KeyShare, ServerHandshake, TrustedAuthority};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn main() {
    simple_logger::init_with_level(log::Level::Debug).expect("logger");
    let mut rng = StdRng::seed_from_u64(42);

    let curve = Bls24::standard().expect("curve");
    println!("p has {} bits, q has {} bits", curve.modulus().bits(), curve.order().bits());

    let authority = TrustedAuthority::new(&curve, &mut rng).expect("authority");
    println!("Alice, Bob and the Server visit the Trusted Authority");
    let alice = authority.extract_client(&curve, b"Alice").expect("extract");
    let bob = authority.extract_client(&curve, b"Robert").expect("extract");
    let server = authority.extract_server(&curve, b"Server").expect("extract");

    for (identity_key, name) in [(&alice, "Alice"), (&bob, "Robert")] {
        println!("{} and Server key exchange", name);
        let (client, client_share) =
            ClientHandshake::start(&curve, identity_key, b"Server", &mut rng).expect("client start");
        let (host, server_share) =
            ServerHandshake::start(&curve, &server, name.as_bytes(), &mut rng).expect("server start");

        // shares cross the wire serialized
        let wire = bincode::serialize(&client_share).expect("serialize");
        let received: KeyShare = bincode::deserialize(&wire).expect("deserialize");

        let client_key = client.finish(&curve, &server_share).expect("client finish");
        let server_key = host.finish(&curve, &received).expect("server finish");
        println!("{:>7} key = {}", name, hex(client_key.as_bytes()));
        println!(" Server key = {}", hex(server_key.as_bytes()));
        assert_eq!(client_key, server_key);
    }
}
