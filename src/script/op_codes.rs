// Constants

/// Pushes 0 onto the stack
pub const OP_0: u8 = 0;
/// Offset for the direct push op-codes, OP_PUSH + n pushes the next n bytes
pub const OP_PUSH: u8 = 0;
/// Largest length that a direct push op-code can carry
pub const OP_PUSH_MAX: u8 = 75;
/// The next byte sets the number of bytes to push onto the stack
pub const OP_PUSHDATA1: u8 = 76;
/// The next two bytes sets the number of bytes to push onto the stack
pub const OP_PUSHDATA2: u8 = 77;
/// The next four bytes sets the number of bytes to push onto the stack
pub const OP_PUSHDATA4: u8 = 78;
/// Pushes -1 onto the stack
pub const OP_1NEGATE: u8 = 79;
/// Pushes 1 onto the stack
pub const OP_1: u8 = 81;
/// Pushes 2 onto the stack
pub const OP_2: u8 = 82;
/// Pushes 3 onto the stack
pub const OP_3: u8 = 83;
/// Pushes 4 onto the stack
pub const OP_4: u8 = 84;
/// Pushes 5 onto the stack
pub const OP_5: u8 = 85;
/// Pushes 6 onto the stack
pub const OP_6: u8 = 86;
/// Pushes 7 onto the stack
pub const OP_7: u8 = 87;
/// Pushes 8 onto the stack
pub const OP_8: u8 = 88;
/// Pushes 9 onto the stack
pub const OP_9: u8 = 89;
/// Pushes 10 onto the stack
pub const OP_10: u8 = 90;
/// Pushes 11 onto the stack
pub const OP_11: u8 = 91;
/// Pushes 12 onto the stack
pub const OP_12: u8 = 92;
/// Pushes 13 onto the stack
pub const OP_13: u8 = 93;
/// Pushes 14 onto the stack
pub const OP_14: u8 = 94;
/// Pushes 15 onto the stack
pub const OP_15: u8 = 95;
/// Pushes 16 onto the stack
pub const OP_16: u8 = 96;

// Flow control

/// Does nothing
pub const OP_NOP: u8 = 97;
/// If the top stack is true, statements are executed. Top stack value is removed.
pub const OP_IF: u8 = 99;
/// If the top stack is false, statements are executed. Top stack value is removed.
pub const OP_NOTIF: u8 = 100;
/// Executes the statements if the previous if was not executed
pub const OP_ELSE: u8 = 103;
/// Ends an if/else block
pub const OP_ENDIF: u8 = 104;
/// Marks a statement as invalid if the top stack value is false. Top stack value is removed.
pub const OP_VERIFY: u8 = 105;
/// Marks a statements as invalid
pub const OP_RETURN: u8 = 106;

// Stack

/// Duplicates the top stack value
pub const OP_DUP: u8 = 118;
/// Removes the top stack value
pub const OP_DROP: u8 = 117;

// Bitwise logic

/// Returns 1 if the inputs are exactly equal, 0 otherwise
pub const OP_EQUAL: u8 = 135;
/// Same as OP_EQUAL, but runs OP_VERIFY afterward
pub const OP_EQUALVERIFY: u8 = 136;

// Cryptographic

/// The input is hashed using RIPEMD-160
pub const OP_RIPEMD160: u8 = 166;
/// The input is hashed using SHA-1
pub const OP_SHA1: u8 = 167;
/// The input is hashed using SHA-256
pub const OP_SHA256: u8 = 168;
/// The input is hashed twice: first with SHA-256 and then with RIPEMD-160
pub const OP_HASH160: u8 = 169;
/// The input is hashed two times with SHA-256
pub const OP_HASH256: u8 = 170;
/// Marks the part of the script after which the signature will begin matching
pub const OP_CODESEPARATOR: u8 = 171;
/// Puts 1 on the stack if the signature authorizes the public key and transaction hash. Otherwise 0.
pub const OP_CHECKSIG: u8 = 172;
/// Same as OP_CHECKSIG, but OP_VERIFY is executed afterward
pub const OP_CHECKSIGVERIFY: u8 = 173;
/// Puts 1 on the stack if m of n signatures authorize the public key and transaction hash. Otherwise 0.
pub const OP_CHECKMULTISIG: u8 = 174;
/// Same as OP_CHECKMULTISIG, but OP_VERIFY is executed afterward
pub const OP_CHECKMULTISIGVERIFY: u8 = 175;

// Locktime

/// Marks transaction as invalid if the top stack item is greater than the transaction's lock_time
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 177;
/// Marks transaction as invalid if the top stack item is less than the transaction's sequence used for relative lock time
pub const OP_CHECKSEQUENCEVERIFY: u8 = 178;

/// Returns the small integer an OP_0..OP_16 op-code pushes
pub fn op_to_small_int(op: u8) -> Option<u8> {
    match op {
        OP_0 => Some(0),
        OP_1..=OP_16 => Some(op - OP_1 + 1),
        _ => None,
    }
}

/// Returns the op-code that pushes the small integer n, for n in 0..=16
pub fn small_int_op(n: u8) -> Option<u8> {
    match n {
        0 => Some(OP_0),
        1..=16 => Some(OP_1 + n - 1),
        _ => None,
    }
}
