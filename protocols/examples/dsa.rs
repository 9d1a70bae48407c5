use protocols::{DsaParams, DsaSignature, DsaSigningKey, DsaVerifyingKey, DSA_P_BITS, DSA_Q_BITS};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    simple_logger::init_with_level(log::Level::Debug).expect("logger");
    let mut rng = StdRng::seed_from_u64(42);

    let params = DsaParams::generate(&mut rng, DSA_P_BITS, DSA_Q_BITS).expect("generate");
    let common = params.to_text();
    println!("common.dss:\n{}", common);

    let sk = DsaSigningKey::random(&params, &mut rng).expect("key");
    let vk = sk.verifying_key(&params).expect("public key");
    println!("public key = {}", vk.value());

    let msg = b"hello dsa";
    let sig = sk.sign(&params, &mut rng, msg).expect("sign");
    let sig_text = sig.to_text();
    println!("signature:\n{}", sig_text);

    // verify from the text forms only
    let params2 = DsaParams::from_text(&common).expect("parse params");
    let sig2 = DsaSignature::from_text(&sig_text).expect("parse signature");
    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");
    let vk2: DsaVerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");

    let ok = vk2.verify(&params2, msg, &sig2).expect("verify");
    println!("Signature is {}verified", if ok { "" } else { "NOT " });
    assert!(ok);
}
