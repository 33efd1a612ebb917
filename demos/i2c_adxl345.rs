// I2C1 で ADXL345 (3 軸加速度センサ) を読み、g 単位で USART3 に出す
//   PB8 = SCL, PB9 = SDA (AF4, オープンドレイン, プルアップ)
//   標準モード 100 kHz (PCLK1 = HSI 16 MHz)

#![no_std]
#![no_main]

use panic_halt as _;

use core::fmt::Write;

use cortex_m_rt::entry;

use cortex_m_semihosting::hprintln;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::adxl345::{self, Sample};
use stm32f429zi_rust_example::i2c::{self, Timing};
use stm32f429zi_rust_example::{board, uart};

// SR1 のフラグ
const SR1_RXNE: u32 = 1 << 6;
const SR1_TXE: u32 = 1 << 7;

fn config_i2c(peripheral: &stm32f429::Peripherals) {
    let timing = Timing::standard_mode(board::HSI_HZ).unwrap();

    // PB8, PB9 を AF4 (I2C1) のオープンドレイン + プルアップにする
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral
        .GPIOB
        .moder
        .modify(|_, w| w.moder8().alternate().moder9().alternate());
    peripheral
        .GPIOB
        .otyper
        .modify(|_, w| w.ot8().open_drain().ot9().open_drain());
    peripheral
        .GPIOB
        .pupdr
        .modify(|_, w| w.pupdr8().pull_up().pupdr9().pull_up());
    peripheral
        .GPIOB
        .afrh
        .modify(|_, w| w.afrh8().af4().afrh9().af4());

    peripheral.RCC.apb1enr.modify(|_, w| w.i2c1en().enabled());

    // ソフトウェアリセットで内部状態を初期化
    peripheral.I2C1.cr1.modify(|_, w| w.swrst().set_bit());
    peripheral.I2C1.cr1.modify(|_, w| w.swrst().clear_bit());

    peripheral
        .I2C1
        .cr2
        .modify(|_, w| unsafe { w.freq().bits(timing.freq_mhz) });
    peripheral
        .I2C1
        .ccr
        .write(|w| unsafe { w.ccr().bits(timing.ccr) });
    peripheral
        .I2C1
        .trise
        .write(|w| unsafe { w.trise().bits(timing.trise) });

    peripheral.I2C1.cr1.modify(|_, w| w.pe().set_bit());
}

fn wait_sr1(i2c: &stm32f429::I2C1, mask: u32) {
    while i2c.sr1.read().bits() & mask == 0 {}
}

fn write_dr(i2c: &stm32f429::I2C1, byte: u8) {
    i2c.dr.write(|w| unsafe { w.bits(u32::from(byte)) });
}

fn read_dr(i2c: &stm32f429::I2C1) -> u8 {
    i2c.dr.read().bits() as u8
}

// START を出して SB を待ち、アドレスを送って ADDR をクリアするまで
// ADDR は SR1 の後に SR2 を読むと落ちるので、クリアの前に ACK を決めておく
fn start(i2c: &stm32f429::I2C1, address: u8, before_addr_clear: impl FnOnce()) {
    i2c.cr1.modify(|_, w| w.start().set_bit());
    while i2c.sr1.read().sb().bit_is_clear() {}

    write_dr(i2c, address);
    while i2c.sr1.read().addr().bit_is_clear() {}

    before_addr_clear();
    let _ = i2c.sr2.read();
}

/// 1byte 読み出し (saddr のレジスタ maddr)
fn byte_read(i2c: &stm32f429::I2C1, saddr: u8, maddr: u8) -> u8 {
    while i2c.sr2.read().busy().bit_is_set() {}

    // 書き込み方向でレジスタアドレスを送る
    start(i2c, i2c::write_address(saddr), || {});
    write_dr(i2c, maddr);
    wait_sr1(i2c, SR1_TXE);

    // リスタートして読み出し方向、1byte だけなので NACK
    start(i2c, i2c::read_address(saddr), || {
        i2c.cr1.modify(|_, w| w.ack().clear_bit())
    });
    i2c.cr1.modify(|_, w| w.stop().set_bit());

    wait_sr1(i2c, SR1_RXNE);
    read_dr(i2c)
}

/// maddr から buf.len() byte 連続で読み出す
fn burst_read(i2c: &stm32f429::I2C1, saddr: u8, maddr: u8, buf: &mut [u8]) {
    while i2c.sr2.read().busy().bit_is_set() {}

    start(i2c, i2c::write_address(saddr), || {});
    wait_sr1(i2c, SR1_TXE);
    write_dr(i2c, maddr);
    wait_sr1(i2c, SR1_TXE);

    start(i2c, i2c::read_address(saddr), || {});
    i2c.cr1.modify(|_, w| w.ack().set_bit());

    let len = buf.len();
    for (i, byte) in buf.iter_mut().enumerate() {
        if i + 1 == len {
            // 最後の 1byte は NACK + STOP
            i2c.cr1.modify(|_, w| w.ack().clear_bit());
            i2c.cr1.modify(|_, w| w.stop().set_bit());
        }
        wait_sr1(i2c, SR1_RXNE);
        *byte = read_dr(i2c);
    }
}

/// maddr から data を連続で書き込む
fn burst_write(i2c: &stm32f429::I2C1, saddr: u8, maddr: u8, data: &[u8]) {
    while i2c.sr2.read().busy().bit_is_set() {}

    start(i2c, i2c::write_address(saddr), || {});
    wait_sr1(i2c, SR1_TXE);
    write_dr(i2c, maddr);

    for byte in data {
        wait_sr1(i2c, SR1_TXE);
        write_dr(i2c, *byte);
    }

    // 最後の byte がシフトアウトされてから STOP
    while i2c.sr1.read().btf().bit_is_clear() {}
    i2c.cr1.modify(|_, w| w.stop().set_bit());
}

fn adxl_init(i2c: &stm32f429::I2C1) {
    let devid = byte_read(i2c, adxl345::DEVICE_ADDR, adxl345::DEVID);
    if devid == adxl345::DEVID_VALUE {
        hprintln!("ADXL345 found (DEVID = {:#04x})", devid).unwrap();
    } else {
        hprintln!("unexpected DEVID {:#04x}", devid).unwrap();
    }

    for (reg, value) in adxl345::INIT_SEQUENCE {
        burst_write(i2c, adxl345::DEVICE_ADDR, reg, &[value]);
    }
}

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    config_i2c(&peripheral);
    uart::init_tx(&peripheral);
    let mut console = uart::Console::new(&peripheral.USART3);

    adxl_init(&peripheral.I2C1);

    let mut raw = [0_u8; 6];
    loop {
        burst_read(
            &peripheral.I2C1,
            adxl345::DEVICE_ADDR,
            adxl345::DATA_START,
            &mut raw,
        );
        let (xg, yg, zg) = Sample::from_bytes(&raw).to_g();
        writeln!(console, "x: {:.3} g, y: {:.3} g, z: {:.3} g", xg, yg, zg).unwrap();
    }
}
